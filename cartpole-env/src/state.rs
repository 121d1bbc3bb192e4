use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bound of the uniform distribution the initial state is sampled from.
const INIT_STATE_BOUND: f64 = 0.05;

/// Structured state of the CartPole environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartPoleMazeState {
    /// Position of the cart, observed within [-4.8, 4.8].
    pub cart_position: f64,

    /// Velocity of the cart, unbounded.
    pub cart_velocity: f64,

    /// Angle of the pole in radians, observed within [-0.418, 0.418] (24 degrees).
    pub pole_angle: f64,

    /// Angular velocity of the pole, unbounded.
    pub pole_angular_velocity: f64,
}

impl CartPoleMazeState {
    /// Constructs a state.
    pub fn new(
        cart_position: f64,
        cart_velocity: f64,
        pole_angle: f64,
        pole_angular_velocity: f64,
    ) -> Self {
        Self {
            cart_position,
            cart_velocity,
            pole_angle,
            pole_angular_velocity,
        }
    }

    /// Samples all components uniformly from `[-0.05, 0.05)`.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        let mut u = || rng.gen_range(-INIT_STATE_BOUND..INIT_STATE_BOUND);
        Self {
            cart_position: u(),
            cart_velocity: u(),
            pole_angle: u(),
            pole_angular_velocity: u(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_sample_within_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let s = CartPoleMazeState::sample(&mut rng);
            for v in [
                s.cart_position,
                s.cart_velocity,
                s.pole_angle,
                s.pole_angular_velocity,
            ]
            .iter()
            {
                assert!(*v >= -0.05 && *v < 0.05);
            }
        }
    }
}
