//! Rendering.
use crate::StepEventLog;
use anyhow::Result;

/// Renders a state of a core environment, typically for debugging.
pub trait Renderer<S, A, E> {
    /// Renders the given state and the action that led to it.
    ///
    /// `events` are the events logged during the step.
    fn render(&self, state: &S, action: Option<&A>, events: &StepEventLog<E>) -> Result<()>;
}
