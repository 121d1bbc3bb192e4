//! Configuration of [`MazeEnv`](super::MazeEnv).
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// Configuration of [`MazeEnv`](super::MazeEnv).
///
/// `CC`, `ACC` and `OCC` are the configurations of the core environment, the action
/// conversion and the observation conversion, respectively.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MazeEnvConfig<CC, ACC, OCC> {
    /// Configuration of the core environment.
    pub core_env: CC,

    /// Configuration of the action conversion.
    #[serde(default)]
    pub action_conversion: ACC,

    /// Configuration of the observation conversion.
    #[serde(default)]
    pub observation_conversion: OCC,

    /// Episodes are truncated after this number of steps, if given.
    #[serde(default)]
    pub max_episode_steps: Option<usize>,

    /// If `true`, every step is rendered with the renderer of the core environment.
    #[serde(default)]
    pub render: bool,
}

impl<CC, ACC, OCC> MazeEnvConfig<CC, ACC, OCC> {
    /// Sets the configuration of the core environment.
    pub fn core_env(mut self, v: CC) -> Self {
        self.core_env = v;
        self
    }

    /// Sets the configuration of the action conversion.
    pub fn action_conversion(mut self, v: ACC) -> Self {
        self.action_conversion = v;
        self
    }

    /// Sets the configuration of the observation conversion.
    pub fn observation_conversion(mut self, v: OCC) -> Self {
        self.observation_conversion = v;
        self
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_episode_steps(mut self, v: Option<usize>) -> Self {
        self.max_episode_steps = v;
        self
    }

    /// Sets the rendering flag.
    pub fn render(mut self, v: bool) -> Self {
        self.render = v;
        self
    }
}

impl<CC, ACC, OCC> MazeEnvConfig<CC, ACC, OCC>
where
    CC: DeserializeOwned,
    ACC: DeserializeOwned + Default,
    OCC: DeserializeOwned + Default,
{
    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }
}

impl<CC, ACC, OCC> MazeEnvConfig<CC, ACC, OCC>
where
    CC: Serialize,
    ACC: Serialize,
    OCC: Serialize,
{
    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }
}
