use crate::{
    CartPoleEnvConfig, DictObservationConversionConfig, KinematicsIntegrator, PhysicsParams,
    DEFAULT_MAX_EPISODE_STEPS,
};
use serde::{Deserialize, Serialize};

/// Configuration of [`CartPoleCoreEnv`](super::CartPoleCoreEnv).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartPoleCoreEnvConfig {
    /// Angle at which the pole is considered fallen over.
    pub theta_threshold_radians: f64,

    /// Distance from the center at which the cart is considered moved away.
    pub x_threshold: f64,

    /// Physical constants.
    #[serde(default)]
    pub physics: PhysicsParams,

    /// Directory rendered frames are written to. Frames are not saved if not set.
    #[serde(default)]
    pub render_dir: Option<String>,
}

impl Default for CartPoleCoreEnvConfig {
    fn default() -> Self {
        Self {
            theta_threshold_radians: 12.0 * 2.0 * std::f64::consts::PI / 360.0,
            x_threshold: 2.4,
            physics: PhysicsParams::default(),
            render_dir: None,
        }
    }
}

impl CartPoleCoreEnvConfig {
    /// Sets the threshold of the pole angle.
    pub fn theta_threshold_radians(mut self, v: f64) -> Self {
        self.theta_threshold_radians = v;
        self
    }

    /// Sets the threshold of the cart position.
    pub fn x_threshold(mut self, v: f64) -> Self {
        self.x_threshold = v;
        self
    }

    /// Sets the physical constants.
    pub fn physics(mut self, v: PhysicsParams) -> Self {
        self.physics = v;
        self
    }

    /// Sets the integration scheme of the physics.
    pub fn kinematics_integrator(mut self, v: KinematicsIntegrator) -> Self {
        self.physics.kinematics_integrator = v;
        self
    }

    /// Sets the directory of rendered frames.
    pub fn render_dir(mut self, v: Option<String>) -> Self {
        self.render_dir = v;
        self
    }

    /// Wraps this configuration into a configuration of [`CartPoleEnv`](crate::CartPoleEnv).
    ///
    /// The observation space is bounded by the thresholds given here, and episodes
    /// are truncated after [`DEFAULT_MAX_EPISODE_STEPS`] steps.
    pub fn into_env_config(self) -> CartPoleEnvConfig {
        let observation_conversion = DictObservationConversionConfig {
            x_threshold: self.x_threshold,
            theta_threshold_radians: self.theta_threshold_radians,
        };
        CartPoleEnvConfig::default()
            .core_env(self)
            .observation_conversion(observation_conversion)
            .max_episode_steps(Some(DEFAULT_MAX_EPISODE_STEPS))
    }
}
