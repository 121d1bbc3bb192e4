use anyhow::Result;
use cartpole_core::error::CoreError;
use serde::{Deserialize, Serialize};

/// Structured action of the CartPole environment.
///
/// Exactly one of the two flags is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPoleMazeAction {
    push_left: bool,
    push_right: bool,
}

impl CartPoleMazeAction {
    /// Constructs an action from the two flags.
    ///
    /// Fails if both or neither of the flags are set.
    pub fn new(push_left: bool, push_right: bool) -> Result<Self> {
        if push_left == push_right {
            return Err(CoreError::InvalidAction(format!(
                "exactly one of push_left ({}) and push_right ({}) must be set",
                push_left, push_right
            ))
            .into());
        }
        Ok(Self {
            push_left,
            push_right,
        })
    }

    /// Push the cart to the left.
    pub fn push_left() -> Self {
        Self {
            push_left: true,
            push_right: false,
        }
    }

    /// Push the cart to the right.
    pub fn push_right() -> Self {
        Self {
            push_left: false,
            push_right: true,
        }
    }

    /// Returns `true` if the cart is pushed to the left.
    pub fn is_push_left(&self) -> bool {
        self.push_left
    }

    /// Returns `true` if the cart is pushed to the right.
    pub fn is_push_right(&self) -> bool {
        self.push_right
    }
}

#[cfg(test)]
mod tests {
    use super::CartPoleMazeAction;

    #[test]
    fn test_exclusive_flags() {
        assert!(CartPoleMazeAction::new(true, true).is_err());
        assert!(CartPoleMazeAction::new(false, false).is_err());
        assert_eq!(
            CartPoleMazeAction::new(true, false).unwrap(),
            CartPoleMazeAction::push_left()
        );
        assert!(CartPoleMazeAction::new(false, true).unwrap().is_push_right());
    }
}
