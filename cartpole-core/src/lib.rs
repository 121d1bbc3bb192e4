#![warn(missing_docs)]
//! Plugin contracts for structured reinforcement learning environments.
//!
//! An environment is split into a *core environment* ([`CoreEnv`]), which owns the
//! simulation and talks in terms of structured states and actions, and a gym-style
//! surface ([`Env`]) that agents interact with. [`MazeEnv`] glues the two together
//! with an [`ActionConversion`] and an [`ObservationConversion`].
//!
//! Rewards are computed from the events a core environment emits at every step
//! ([`StepEventLog`]) by a [`RewardAggregator`]. At the end of an episode a
//! [`KpiCalculator`] summarizes the [`EpisodeEventLog`].
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{
    Act, ActionConversion, ActorId, Configurable, CoreEnv, CoreStep, Env, Info, KpiCalculator,
    MazeInfo, Obs, ObservationConversion, Policy, Renderer, RewardAggregator, Step,
};

mod event_log;
pub use event_log::{EpisodeEventLog, Event, StepEventLog};

mod space;
pub use space::Space;

mod maze_env;
pub use maze_env::{MazeEnv, MazeEnvConfig};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
