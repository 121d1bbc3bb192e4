//! Conversions between structured states/actions and agent spaces.
use super::{Act, Obs};
use crate::Space;
use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

/// Converts agent actions into structured actions of a core environment and back.
pub trait ActionConversion<S, A> {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Action in the agent space.
    type SpaceAct: Act;

    /// Builds the conversion.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Converts an agent action into a structured action.
    ///
    /// The current state is given for conversions depending on it.
    fn space_to_maze(&self, act: &Self::SpaceAct, state: &S) -> Result<A>;

    /// Converts a structured action into an agent action.
    fn maze_to_space(&self, action: &A) -> Self::SpaceAct;

    /// The action space.
    fn space(&self) -> Space;
}

/// Converts structured states of a core environment into agent observations and back.
pub trait ObservationConversion<S> {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Observation in the agent space.
    type SpaceObs: Obs;

    /// Builds the conversion.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Converts a structured state into an agent observation.
    fn maze_to_space(&self, state: &S) -> Self::SpaceObs;

    /// Converts an agent observation back into a structured state.
    fn space_to_maze(&self, obs: &Self::SpaceObs) -> Result<S>;

    /// The observation space.
    fn space(&self) -> Space;
}
