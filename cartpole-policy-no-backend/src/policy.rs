use crate::{Mat, PolicyNet};
use anyhow::{ensure, Result};
use cartpole_core::{Configurable, Policy};
use cartpole_env::{CartPoleAct, CartPoleEnv, CartPoleObs, OBS_KEYS};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

const N_ACTIONS: usize = 2;

/// Configuration of [`MlpPolicy`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlpPolicyConfig {
    /// Units of the hidden layers.
    pub hidden_units: Vec<usize>,

    /// If `true`, the action with the largest logit is taken.
    /// Otherwise actions are sampled from the softmax of the logits.
    pub deterministic: bool,

    /// Seed of weight initialization and action sampling.
    pub seed: u64,
}

impl Default for MlpPolicyConfig {
    fn default() -> Self {
        Self {
            hidden_units: vec![128, 128],
            deterministic: true,
            seed: 42,
        }
    }
}

impl MlpPolicyConfig {
    /// Sets the units of the hidden layers.
    pub fn hidden_units(mut self, v: Vec<usize>) -> Self {
        self.hidden_units = v;
        self
    }

    /// Sets the flag of deterministic action selection.
    pub fn deterministic(mut self, v: bool) -> Self {
        self.deterministic = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }
}

/// Policy of [`CartPoleEnv`] based on [`PolicyNet`].
pub struct MlpPolicy {
    net: PolicyNet,
    deterministic: bool,
    rng: StdRng,
}

impl Configurable for MlpPolicy {
    type Config = MlpPolicyConfig;

    /// Builds a policy with freshly initialized weights.
    ///
    /// Use [`MlpPolicy::new`] to reject configurations with zero-width hidden layers.
    fn build(config: Self::Config) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let net = PolicyNet::new(OBS_KEYS.len(), &config.hidden_units, N_ACTIONS, &mut rng);
        Self {
            net,
            deterministic: config.deterministic,
            rng,
        }
    }
}

impl MlpPolicy {
    /// Builds a policy with freshly initialized weights, checking the configuration.
    pub fn new(config: MlpPolicyConfig) -> Result<Self> {
        ensure!(
            config.hidden_units.iter().all(|&u| u > 0),
            "hidden layers must have at least one unit, got {:?}",
            config.hidden_units
        );
        Ok(Self::build(config))
    }

    /// Wraps a network.
    pub fn from_net(net: PolicyNet, deterministic: bool, seed: u64) -> Result<Self> {
        net.check()?;
        ensure!(
            net.in_dim() == OBS_KEYS.len() && net.out_dim() == N_ACTIONS,
            "expected a network mapping {} inputs to {} logits, got {} to {}",
            OBS_KEYS.len(),
            N_ACTIONS,
            net.in_dim(),
            net.out_dim()
        );
        Ok(Self {
            net,
            deterministic,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Loads the parameters of the network from a file.
    pub fn load(path: impl AsRef<Path>, deterministic: bool, seed: u64) -> Result<Self> {
        info!("Load policy parameters from {:?}", path.as_ref());
        Self::from_net(PolicyNet::load(path)?, deterministic, seed)
    }

    /// Saves the parameters of the network to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        info!("Save policy parameters to {:?}", path.as_ref());
        self.net.save(path)
    }

    /// The network.
    pub fn net(&self) -> &PolicyNet {
        &self.net
    }

    /// Logits of the actions.
    pub fn logits(&self, obs: &CartPoleObs) -> Mat {
        self.net.forward(&obs.to_vec().into())
    }
}

impl Policy<CartPoleEnv> for MlpPolicy {
    fn sample(&mut self, obs: &CartPoleObs) -> CartPoleAct {
        let logits = self.logits(obs);
        let action = if self.deterministic {
            logits.argmax()
        } else {
            let probs = logits.softmax();
            let u: f32 = self.rng.gen();
            let mut cum = 0.0;
            probs
                .data
                .iter()
                .position(|p| {
                    cum += p;
                    u < cum
                })
                .unwrap_or(N_ACTIONS - 1)
        };
        CartPoleAct::from(action as i32)
    }
}
