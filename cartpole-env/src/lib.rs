//! The CartPole balancing task as a structured environment.
//!
//! A pole is attached by an un-actuated joint to a cart, which moves along a
//! frictionless track. The cart is pushed to the left or to the right at every step
//! and the goal is to keep the pole upright. The episode terminates when the cart
//! leaves the track or the pole tilts too far.
//!
//! The simulation lives in [`CartPoleCoreEnv`]; [`CartPoleEnv`] exposes it through
//! dictionary-like observation and action spaces.
//!
//! ```no_run
//! use anyhow::Result;
//! use cartpole_core::{DefaultEvaluator, Evaluator as _};
//! use cartpole_env::{CartPoleEnv, CartPoleEnvConfig, CartPoleHeuristicPolicy};
//!
//! fn main() -> Result<()> {
//!     let config = CartPoleEnvConfig::default().max_episode_steps(Some(500));
//!     let mut policy = CartPoleHeuristicPolicy;
//!     let record = DefaultEvaluator::<CartPoleEnv>::new(&config, 0, 5)?.evaluate(&mut policy)?;
//!     println!("{:?}", record);
//!     Ok(())
//! }
//! ```
mod action;
mod conversion;
mod core_env;
mod events;
mod kpi;
pub mod physics;
mod policy;
mod renderer;
mod reward;
mod state;

pub use action::CartPoleMazeAction;
pub use conversion::{
    CartPoleAct, CartPoleObs, DictActionConversion, DictActionConversionConfig,
    DictObservationConversion, DictObservationConversionConfig, OBS_KEYS,
};
pub use core_env::{CartPoleCoreEnv, CartPoleCoreEnvConfig};
pub use events::CartPoleEvent;
pub use kpi::CartPoleKpiCalculator;
pub use physics::{KinematicsIntegrator, PhysicsParams, Termination};
pub use policy::{CartPoleHeuristicPolicy, RandomPolicy, RandomPolicyConfig};
pub use renderer::CartPoleRenderer;
pub use reward::CartPoleRewardAggregator;
pub use state::CartPoleMazeState;

use cartpole_core::{MazeEnv, MazeEnvConfig};

/// The number of steps after which episodes are truncated in
/// [`CartPoleCoreEnvConfig::into_env_config`].
pub const DEFAULT_MAX_EPISODE_STEPS: usize = 500;

/// Configuration of [`CartPoleEnv`].
pub type CartPoleEnvConfig = MazeEnvConfig<
    CartPoleCoreEnvConfig,
    DictActionConversionConfig,
    DictObservationConversionConfig,
>;

/// CartPole environment with dictionary-like observations and actions.
pub type CartPoleEnv = MazeEnv<CartPoleCoreEnv, DictActionConversion, DictObservationConversion>;
