//! Reward aggregation.
use crate::StepEventLog;

/// Turns the events emitted during a step into rewards.
pub trait RewardAggregator<E> {
    /// Assigns rewards and penalties according to the events of the step.
    ///
    /// Returns individual reward components, which are combined by
    /// [`RewardAggregator::to_scalar_reward`].
    fn summarize_reward(&mut self, events: &StepEventLog<E>) -> Vec<f32>;

    /// Combines reward components into a scalar. Sums them by default.
    fn to_scalar_reward(&self, reward: &[f32]) -> f32 {
        reward.iter().sum()
    }

    /// Clears any state accumulated over an episode.
    fn reset(&mut self);
}
