use crate::CartPoleMazeState;
use anyhow::Result;
use cartpole_core::{error::CoreError, Obs, ObservationConversion, Space};
use serde::{Deserialize, Serialize};

/// Keys of the observation space in the order of [`CartPoleObs::to_vec`].
pub const OBS_KEYS: [&str; 4] = [
    "cart_position",
    "cart_velocity",
    "pole_angle",
    "pole_angular_velocity",
];

/// Observation of [`CartPoleEnv`](crate::CartPoleEnv).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartPoleObs {
    /// Position of the cart.
    pub cart_position: f32,

    /// Velocity of the cart.
    pub cart_velocity: f32,

    /// Angle of the pole in radians.
    pub pole_angle: f32,

    /// Angular velocity of the pole.
    pub pole_angular_velocity: f32,
}

impl Obs for CartPoleObs {}

impl CartPoleObs {
    /// The values in the order of [`OBS_KEYS`].
    pub fn to_vec(&self) -> Vec<f32> {
        vec![
            self.cart_position,
            self.cart_velocity,
            self.pole_angle,
            self.pole_angular_velocity,
        ]
    }

    /// Looks up a value by its key in the observation space.
    pub fn get(&self, key: &str) -> Option<f32> {
        match key {
            "cart_position" => Some(self.cart_position),
            "cart_velocity" => Some(self.cart_velocity),
            "pole_angle" => Some(self.pole_angle),
            "pole_angular_velocity" => Some(self.pole_angular_velocity),
            _ => None,
        }
    }
}

/// Configuration of [`DictObservationConversion`].
///
/// The thresholds determine the bounds of the observation space, which are twice
/// the termination thresholds of the core environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictObservationConversionConfig {
    /// Threshold of the cart position.
    pub x_threshold: f64,

    /// Threshold of the pole angle.
    pub theta_threshold_radians: f64,
}

impl Default for DictObservationConversionConfig {
    fn default() -> Self {
        Self {
            x_threshold: 2.4,
            theta_threshold_radians: 12.0 * 2.0 * std::f64::consts::PI / 360.0,
        }
    }
}

/// Converts [`CartPoleMazeState`] into [`CartPoleObs`].
#[derive(Clone, Debug)]
pub struct DictObservationConversion {
    x_threshold: f64,
    theta_threshold_radians: f64,
}

impl ObservationConversion<CartPoleMazeState> for DictObservationConversion {
    type Config = DictObservationConversionConfig;
    type SpaceObs = CartPoleObs;

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(Self {
            x_threshold: config.x_threshold,
            theta_threshold_radians: config.theta_threshold_radians,
        })
    }

    fn maze_to_space(&self, state: &CartPoleMazeState) -> CartPoleObs {
        CartPoleObs {
            cart_position: state.cart_position as f32,
            cart_velocity: state.cart_velocity as f32,
            pole_angle: state.pole_angle as f32,
            pole_angular_velocity: state.pole_angular_velocity as f32,
        }
    }

    fn space_to_maze(&self, obs: &CartPoleObs) -> Result<CartPoleMazeState> {
        let values = obs.to_vec();
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CoreError::InvalidObservation(format!("{:?}", obs)).into());
        }
        Ok(CartPoleMazeState::new(
            obs.cart_position as f64,
            obs.cart_velocity as f64,
            obs.pole_angle as f64,
            obs.pole_angular_velocity as f64,
        ))
    }

    fn space(&self) -> Space {
        let x = (self.x_threshold * 2.0) as f32;
        let theta = (self.theta_threshold_radians * 2.0) as f32;
        Space::dict(vec![
            (OBS_KEYS[0], Space::uniform_box(-x, x, &[1])),
            (OBS_KEYS[1], Space::uniform_box(f32::MIN, f32::MAX, &[1])),
            (OBS_KEYS[2], Space::uniform_box(-theta, theta, &[1])),
            (OBS_KEYS[3], Space::uniform_box(f32::MIN, f32::MAX, &[1])),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_space() {
        let conv = DictObservationConversion::build(&Default::default()).unwrap();
        let space = conv.space();
        assert_eq!(space.flat_dim(), 4);

        let obs = conv.maze_to_space(&CartPoleMazeState::new(1.0, -3.0, 0.1, 0.5));
        for key in OBS_KEYS.iter() {
            let value = obs.get(key).unwrap();
            assert!(space.get(key).unwrap().contains_box(&[value]));
        }
        assert!(!space.get("cart_position").unwrap().contains_box(&[4.9]));
        assert!(!space.get("pole_angle").unwrap().contains_box(&[0.42]));
        assert!(obs.get("unknown").is_none());
    }

    #[test]
    fn test_state_conversion() {
        let conv = DictObservationConversion::build(&Default::default()).unwrap();
        let state = CartPoleMazeState::new(0.5, -0.25, 0.125, 2.0);
        let obs = conv.maze_to_space(&state);
        assert_eq!(obs.to_vec(), vec![0.5, -0.25, 0.125, 2.0]);
        assert_eq!(conv.space_to_maze(&obs).unwrap(), state);

        let invalid = CartPoleObs {
            pole_angle: f32::NAN,
            ..obs
        };
        assert!(conv.space_to_maze(&invalid).is_err());
    }
}
