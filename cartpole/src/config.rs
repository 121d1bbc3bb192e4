use anyhow::Result;
use cartpole_env::{CartPoleCoreEnvConfig, CartPoleEnvConfig, KinematicsIntegrator};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

fn default_hidden_units() -> Vec<usize> {
    vec![128, 128]
}

fn default_true() -> bool {
    true
}

/// Policy acting in a rollout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyConfig {
    /// Uniformly random actions.
    Random,

    /// Pushes the cart towards the side the pole leans to.
    Heuristic,

    /// Multilayer perceptron, freshly initialized unless `params_path` is given.
    Mlp {
        /// Units of the hidden layers.
        #[serde(default = "default_hidden_units")]
        hidden_units: Vec<usize>,

        /// Arg-max actions if `true`, sampled from the softmax otherwise.
        #[serde(default = "default_true")]
        deterministic: bool,

        /// File of parameters saved with `MlpPolicy::save`.
        #[serde(default)]
        params_path: Option<String>,
    },
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::Random
    }
}

impl PolicyConfig {
    /// A freshly initialized, deterministic multilayer perceptron.
    pub fn mlp() -> Self {
        Self::Mlp {
            hidden_units: default_hidden_units(),
            deterministic: true,
            params_path: None,
        }
    }
}

/// Random seeds of a rollout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedingConfig {
    /// Seed of the environment. Episode `i` is started with seed `env_base_seed + i`.
    pub env_base_seed: i64,

    /// Seed of stochastic policies.
    pub agent_base_seed: u64,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            env_base_seed: 698376768,
            agent_base_seed: 2079466554,
        }
    }
}

/// Configuration of [`RolloutRunner`](crate::RolloutRunner).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloutConfig {
    /// Environment.
    pub env: CartPoleEnvConfig,

    /// Policy.
    pub policy: PolicyConfig,

    /// The number of episodes.
    pub n_episodes: usize,

    /// Random seeds.
    pub seeding: SeedingConfig,

    /// If `true`, every step is rendered.
    pub render: bool,

    /// Directory of the TensorBoard event file and `eval.csv`. Nothing is written if not set.
    pub log_dir: Option<String>,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            env: CartPoleCoreEnvConfig::default().into_env_config(),
            policy: PolicyConfig::default(),
            n_episodes: 10,
            seeding: SeedingConfig::default(),
            render: false,
            log_dir: None,
        }
    }
}

impl RolloutConfig {
    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    /// Sets the environment.
    pub fn env(mut self, v: CartPoleEnvConfig) -> Self {
        self.env = v;
        self
    }

    /// Sets the policy.
    pub fn policy(mut self, v: PolicyConfig) -> Self {
        self.policy = v;
        self
    }

    /// Sets the number of episodes.
    pub fn n_episodes(mut self, v: usize) -> Self {
        self.n_episodes = v;
        self
    }

    /// Sets the seed of the environment.
    pub fn env_base_seed(mut self, v: i64) -> Self {
        self.seeding.env_base_seed = v;
        self
    }

    /// Sets the seed of the policy.
    pub fn agent_base_seed(mut self, v: u64) -> Self {
        self.seeding.agent_base_seed = v;
        self
    }

    /// Enables or disables rendering.
    pub fn render(mut self, v: bool) -> Self {
        self.render = v;
        self
    }

    /// Sets the directory rendered frames are saved to.
    pub fn render_dir(mut self, v: Option<String>) -> Self {
        self.env.core_env.render_dir = v;
        self
    }

    /// Sets the log directory.
    pub fn log_dir(mut self, v: Option<String>) -> Self {
        self.log_dir = v;
        self
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_episode_steps(mut self, v: Option<usize>) -> Self {
        self.env.max_episode_steps = v;
        self
    }

    /// Sets the integration scheme of the physics.
    pub fn kinematics_integrator(mut self, v: KinematicsIntegrator) -> Self {
        self.env.core_env.physics.kinematics_integrator = v;
        self
    }
}
