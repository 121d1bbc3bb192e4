//! Rollout jobs of policies on the CartPole environment.
//!
//! A job is described by a [`RolloutConfig`], loaded from a YAML file and adjusted
//! with builder methods (or the command line flags of the `cartpole-rollout` binary).
//! [`RolloutRunner`] runs the episodes and writes their records to TensorBoard.
mod config;
mod policy;
mod runner;
pub use config::{PolicyConfig, RolloutConfig, SeedingConfig};
pub use policy::CartPolePolicy;
pub use runner::{EpisodeSummary, RolloutRunner, RolloutSummary};
