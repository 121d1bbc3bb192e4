use crate::{CartPoleEvent, CartPoleMazeState};
use cartpole_core::{
    record::{Record, RecordValue},
    EpisodeEventLog, KpiCalculator,
};

/// Computes `average_cart_velocity_per_step` at the end of an episode.
#[derive(Clone, Debug, Default)]
pub struct CartPoleKpiCalculator;

impl KpiCalculator<CartPoleMazeState, CartPoleEvent> for CartPoleKpiCalculator {
    fn calculate_kpis(
        &self,
        episode_event_log: &EpisodeEventLog<CartPoleEvent>,
        _last_state: &CartPoleMazeState,
    ) -> Record {
        let n_steps = episode_event_log.len();
        if n_steps == 0 {
            return Record::empty();
        }

        let total: f64 = episode_event_log
            .query_events(|e| matches!(e, CartPoleEvent::CartVelocity { .. }))
            .map(|e| match e {
                CartPoleEvent::CartVelocity { velocity } => *velocity,
                _ => 0.0,
            })
            .sum();

        Record::from_slice(&[(
            "average_cart_velocity_per_step",
            RecordValue::Scalar((total / n_steps as f64) as f32),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartpole_core::StepEventLog;

    #[test]
    fn test_average_velocity() {
        let calc = CartPoleKpiCalculator;
        let state = CartPoleMazeState::default();
        let mut episode = EpisodeEventLog::new();
        assert!(calc.calculate_kpis(&episode, &state).is_empty());

        for (t, v) in [0.5, -0.25, 1.0].iter().enumerate() {
            let mut log = StepEventLog::new(t + 1);
            log.push(CartPoleEvent::CartVelocity { velocity: *v });
            episode.push(log);
        }
        let kpis = calc.calculate_kpis(&episode, &state);
        let avg = kpis.get_scalar("average_cart_velocity_per_step").unwrap();
        assert!((avg - 0.41666666).abs() < 1e-6);
    }
}
