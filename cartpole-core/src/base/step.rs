//! Environment step.
use super::{ActorId, Env};

/// Additional information to `Obs` and `Act`.
pub trait Info {}

impl Info for () {}

/// Information attached to every step of a [`MazeEnv`](crate::MazeEnv).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MazeInfo {
    /// The actor that took the step.
    pub actor_id: ActorId,

    /// The number of steps taken in the current episode, including this one.
    pub env_time: usize,
}

impl Info for MazeInfo {}

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with some additional information.
///
/// An environment emits [`Step`] object at every interaction steps.
pub struct Step<E: Env> {
    /// Action.
    pub act: E::Act,

    /// Observation.
    pub obs: E::Obs,

    /// Scalar reward.
    pub reward: f32,

    /// Flag denoting if episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if episode is truncated.
    pub is_truncated: bool,

    /// Information defined by user.
    pub info: E::Info,

    /// Initial observation of the next episode.
    ///
    /// Set by [`Env::step_with_reset`] when the episode ended with this step.
    pub init_obs: Option<E::Obs>,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(
        obs: E::Obs,
        act: E::Act,
        reward: f32,
        is_terminated: bool,
        is_truncated: bool,
        info: E::Info,
    ) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
            init_obs: None,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}
