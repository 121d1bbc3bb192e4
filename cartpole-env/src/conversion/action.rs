use crate::{CartPoleMazeAction, CartPoleMazeState};
use anyhow::Result;
use cartpole_core::{error::CoreError, Act, ActionConversion, Space};
use serde::{Deserialize, Serialize};

/// Action of [`CartPoleEnv`](crate::CartPoleEnv): `0` pushes left, `1` pushes right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPoleAct {
    /// Discrete action.
    pub action: i32,
}

impl Act for CartPoleAct {}

impl From<i32> for CartPoleAct {
    fn from(action: i32) -> Self {
        Self { action }
    }
}

/// Configuration of [`DictActionConversion`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DictActionConversionConfig {}

/// Converts [`CartPoleAct`] into [`CartPoleMazeAction`].
#[derive(Clone, Debug)]
pub struct DictActionConversion;

impl ActionConversion<CartPoleMazeState, CartPoleMazeAction> for DictActionConversion {
    type Config = DictActionConversionConfig;
    type SpaceAct = CartPoleAct;

    fn build(_config: &Self::Config) -> Result<Self> {
        Ok(Self)
    }

    fn space_to_maze(
        &self,
        act: &CartPoleAct,
        _state: &CartPoleMazeState,
    ) -> Result<CartPoleMazeAction> {
        match act.action {
            0 => Ok(CartPoleMazeAction::push_left()),
            1 => Ok(CartPoleMazeAction::push_right()),
            a => Err(CoreError::InvalidAction(format!("expected 0 or 1, got {}", a)).into()),
        }
    }

    fn maze_to_space(&self, action: &CartPoleMazeAction) -> CartPoleAct {
        CartPoleAct {
            action: action.is_push_right() as i32,
        }
    }

    fn space(&self) -> Space {
        Space::dict(vec![("action", Space::Discrete(2))])
    }
}
