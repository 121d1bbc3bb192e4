//! Core environment.
use super::{KpiCalculator, Renderer};
use crate::StepEventLog;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Debug};

/// Identifies the actor taking the current step.
///
/// `step_key` selects the sub-step (and the policy acting in it), `agent` the agent
/// within the sub-step. Single-agent environments always return the default value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId {
    /// Sub-step key.
    pub step_key: usize,

    /// Agent index within the sub-step.
    pub agent: usize,
}

/// Result of a single step of a [`CoreEnv`].
#[derive(Clone, Debug)]
pub struct CoreStep<S> {
    /// State after the step.
    pub state: S,

    /// Scalar reward aggregated from the events of the step.
    pub reward: f32,

    /// `true` if the episode is terminated.
    pub done: bool,
}

/// The simulation part of a structured environment.
///
/// A core environment works on structured states and actions. It emits events into
/// a [`StepEventLog`] during [`CoreEnv::step`], from which the reward is aggregated.
pub trait CoreEnv {
    /// Configuration.
    type Config: Clone;

    /// Structured state of the environment.
    type State: Clone + Debug;

    /// Structured action of the environment.
    type Action: Clone + Debug;

    /// Events emitted by the environment.
    type Event: crate::Event;

    /// Renderer for states of this environment.
    type Renderer: Renderer<Self::State, Self::Action, Self::Event>;

    /// Calculator of key performance indicators of an episode.
    type KpiCalculator: KpiCalculator<Self::State, Self::Event>;

    /// Builds the core environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Applies the action and advances the simulation by one step.
    fn step(&mut self, action: &Self::Action) -> CoreStep<Self::State>;

    /// Resets the environment to an initial state.
    fn reset(&mut self) -> Self::State;

    /// Reseeds the random number generator of the environment.
    fn seed(&mut self, seed: i64);

    /// Returns a snapshot of the current state.
    fn state(&self) -> Self::State;

    /// Events emitted during the last step.
    fn events(&self) -> &StepEventLog<Self::Event>;

    /// Returns the renderer.
    fn renderer(&self) -> &Self::Renderer;

    /// Returns the KPI calculator.
    fn kpi_calculator(&self) -> &Self::KpiCalculator;

    /// Releases resources held by the environment.
    fn close(&mut self) {}

    /// Returns the actor taking the next step.
    fn actor_id(&self) -> ActorId {
        ActorId::default()
    }

    /// Returns `true` if the actor that just stepped is done.
    ///
    /// This is different from the done flag of the environment.
    fn is_actor_done(&self) -> bool {
        false
    }

    /// Number of agents acting in each sub-step.
    fn agent_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        counts.insert(0, 1);
        counts
    }
}
