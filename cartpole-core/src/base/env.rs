//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// Represents a gym-style environment, typically an MDP.
///
/// This is the surface agents interact with. Structured environments implement
/// [`CoreEnv`](crate::CoreEnv) and are exposed through [`MazeEnv`](crate::MazeEnv),
/// which implements this trait.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Performes an environment step.
    ///
    /// The returned [`Record`] holds statistics of the events emitted during the step.
    /// When the step ends an episode, the record also contains the KPIs of the episode.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performes an environment step and resets the environment if an episode ends.
    ///
    /// The observation after the reset is stored in [`Step::init_obs`].
    fn step_with_reset(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized,
    {
        let (mut step, record) = self.step(a)?;
        if step.is_done() {
            step.init_obs = Some(self.reset()?);
        }
        Ok((step, record))
    }

    /// Resets the environment with a given index.
    ///
    /// The index is used in an arbitrary way. For example, it can be used as an offset
    /// of the random seed, which is useful when evaluating a policy on reproducible
    /// episodes. This method is called in [`DefaultEvaluator`].
    ///
    /// [`DefaultEvaluator`]: crate::DefaultEvaluator
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs>;
}
