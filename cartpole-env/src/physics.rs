//! Dynamics of the cart-pole system.
//!
//! The equations of motion follow
//! [Florian (2005), Correct equations for the dynamics of the cart-pole system](https://coneural.org/florian/papers/05_cart_pole.pdf),
//! without friction.
use crate::CartPoleMazeState;
use serde::{Deserialize, Serialize};

/// Numerical integration scheme of [`step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KinematicsIntegrator {
    /// Positions and velocities are updated from the values before the step.
    Euler,

    /// Velocities are updated first, positions use the updated velocities.
    SemiImplicitEuler,
}

impl Default for KinematicsIntegrator {
    fn default() -> Self {
        Self::Euler
    }
}

/// Physical constants of the system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Gravitational acceleration.
    pub gravity: f64,

    /// Mass of the cart.
    pub mass_cart: f64,

    /// Mass of the pole.
    pub mass_pole: f64,

    /// Half the length of the pole.
    pub length: f64,

    /// Magnitude of the force pushing the cart.
    pub force_mag: f64,

    /// Seconds between state updates.
    pub tau: f64,

    /// Integration scheme.
    pub kinematics_integrator: KinematicsIntegrator,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            mass_cart: 1.0,
            mass_pole: 0.1,
            length: 0.5,
            force_mag: 10.0,
            tau: 0.02,
            kinematics_integrator: KinematicsIntegrator::Euler,
        }
    }
}

impl PhysicsParams {
    /// Sets the integration scheme.
    pub fn kinematics_integrator(mut self, v: KinematicsIntegrator) -> Self {
        self.kinematics_integrator = v;
        self
    }

    /// Sets the time step.
    pub fn tau(mut self, v: f64) -> Self {
        self.tau = v;
        self
    }

    /// Mass of the cart and the pole.
    pub fn total_mass(&self) -> f64 {
        self.mass_cart + self.mass_pole
    }

    /// Mass of the pole times its half length.
    pub fn polemass_length(&self) -> f64 {
        self.mass_pole * self.length
    }
}

/// Advances the state by one time step with the cart pushed in the given direction.
pub fn step(state: &CartPoleMazeState, push_right: bool, params: &PhysicsParams) -> CartPoleMazeState {
    let CartPoleMazeState {
        cart_position: x,
        cart_velocity: x_dot,
        pole_angle: theta,
        pole_angular_velocity: theta_dot,
    } = *state;

    let force = if push_right {
        params.force_mag
    } else {
        -params.force_mag
    };
    let total_mass = params.total_mass();
    let polemass_length = params.polemass_length();
    let (sintheta, costheta) = theta.sin_cos();

    let temp = (force + polemass_length * theta_dot.powi(2) * sintheta) / total_mass;
    let theta_acc = (params.gravity * sintheta - costheta * temp)
        / (params.length * (4.0 / 3.0 - params.mass_pole * costheta.powi(2) / total_mass));
    let x_acc = temp - polemass_length * theta_acc * costheta / total_mass;

    let tau = params.tau;
    match params.kinematics_integrator {
        KinematicsIntegrator::Euler => CartPoleMazeState {
            cart_position: x + tau * x_dot,
            cart_velocity: x_dot + tau * x_acc,
            pole_angle: theta + tau * theta_dot,
            pole_angular_velocity: theta_dot + tau * theta_acc,
        },
        KinematicsIntegrator::SemiImplicitEuler => {
            let x_dot = x_dot + tau * x_acc;
            let theta_dot = theta_dot + tau * theta_acc;
            CartPoleMazeState {
                cart_position: x + tau * x_dot,
                cart_velocity: x_dot,
                pole_angle: theta + tau * theta_dot,
                pole_angular_velocity: theta_dot,
            }
        }
    }
}

/// Termination flags of a state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Termination {
    /// The cart left the allowed interval of positions.
    pub cart_moved_away: bool,

    /// The pole tilted beyond the allowed angle.
    pub pole_fell_over: bool,
}

impl Termination {
    /// Returns `true` if any of the flags is set.
    pub fn is_done(&self) -> bool {
        self.cart_moved_away || self.pole_fell_over
    }
}

/// Checks the position and the angle against their thresholds.
///
/// Values equal to a threshold are still within bounds.
pub fn termination(
    state: &CartPoleMazeState,
    x_threshold: f64,
    theta_threshold_radians: f64,
) -> Termination {
    Termination {
        cart_moved_away: state.cart_position < -x_threshold || state.cart_position > x_threshold,
        pole_fell_over: state.pole_angle < -theta_threshold_radians
            || state.pole_angle > theta_threshold_radians,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_euler_at_rest() {
        // Upright pole at rest: only the push accelerates the system.
        let params = PhysicsParams::default();
        let s = step(&CartPoleMazeState::default(), true, &params);

        let total_mass = 1.1;
        let temp = 10.0 / total_mass;
        let theta_acc = -temp / (0.5 * (4.0 / 3.0 - 0.1 / total_mass));
        let x_acc = temp - 0.05 * theta_acc / total_mass;

        // Euler uses the old velocities for the positions.
        assert_eq!(s.cart_position, 0.0);
        assert_eq!(s.pole_angle, 0.0);
        assert!((s.cart_velocity - 0.02 * x_acc).abs() < EPS);
        assert!((s.pole_angular_velocity - 0.02 * theta_acc).abs() < EPS);
        assert!(s.cart_velocity > 0.0);
        assert!(s.pole_angular_velocity < 0.0);
    }

    #[test]
    fn test_semi_implicit_euler_uses_new_velocities() {
        let params = PhysicsParams::default().kinematics_integrator(KinematicsIntegrator::SemiImplicitEuler);
        let s = step(&CartPoleMazeState::default(), false, &params);

        assert!(s.cart_velocity < 0.0);
        assert!((s.cart_position - 0.02 * s.cart_velocity).abs() < EPS);
        assert!((s.pole_angle - 0.02 * s.pole_angular_velocity).abs() < EPS);
    }

    #[test]
    fn test_push_directions_are_symmetric() {
        let params = PhysicsParams::default();
        let s0 = CartPoleMazeState::new(0.1, 0.2, 0.03, -0.1);
        let mirrored = CartPoleMazeState::new(-0.1, -0.2, -0.03, 0.1);

        let a = step(&s0, true, &params);
        let b = step(&mirrored, false, &params);
        assert!((a.cart_position + b.cart_position).abs() < EPS);
        assert!((a.cart_velocity + b.cart_velocity).abs() < EPS);
        assert!((a.pole_angle + b.pole_angle).abs() < EPS);
        assert!((a.pole_angular_velocity + b.pole_angular_velocity).abs() < EPS);
    }

    #[test]
    fn test_deterministic() {
        let params = PhysicsParams::default();
        let mut a = CartPoleMazeState::new(0.01, -0.02, 0.03, 0.04);
        let mut b = a;
        for i in 0..50 {
            a = step(&a, i % 3 == 0, &params);
            b = step(&b, i % 3 == 0, &params);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_termination_thresholds() {
        let x_th = 2.4;
        let theta_th = 0.2;
        let t = |x: f64, theta: f64| termination(&CartPoleMazeState::new(x, 0.0, theta, 0.0), x_th, theta_th);

        assert_eq!(t(0.0, 0.0), Termination::default());
        assert!(!t(2.4, 0.2).is_done());
        assert!(!t(-2.4, -0.2).is_done());
        assert!(t(2.41, 0.0).cart_moved_away);
        assert!(t(-2.41, 0.0).cart_moved_away);
        assert!(!t(-2.41, 0.0).pole_fell_over);
        assert!(t(0.0, 0.21).pole_fell_over);
        assert!(t(0.0, -0.21).pole_fell_over);

        let both = t(3.0, -0.5);
        assert!(both.cart_moved_away && both.pole_fell_over);
    }
}
