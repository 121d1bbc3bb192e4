use cartpole_core::Event;

/// Events emitted by [`CartPoleCoreEnv`](crate::CartPoleCoreEnv).
#[derive(Clone, Debug, PartialEq)]
pub enum CartPoleEvent {
    /// The cart position left the allowed interval.
    CartMovedAway,

    /// The pole angle exceeded its threshold.
    PoleFellOver,

    /// Velocity of the cart after the step, emitted at every step.
    CartVelocity {
        /// Cart velocity.
        velocity: f64,
    },
}

impl CartPoleEvent {
    /// Returns `true` for events terminating the episode.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CartMovedAway | Self::PoleFellOver)
    }
}

impl Event for CartPoleEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::CartMovedAway => "cart_moved_away",
            Self::PoleFellOver => "pole_fell_over",
            Self::CartVelocity { .. } => "cart_velocity",
        }
    }

    fn value(&self) -> f32 {
        match self {
            Self::CartVelocity { velocity } => *velocity as f32,
            _ => 1.0,
        }
    }
}
