//! Key performance indicators.
use crate::{record::Record, EpisodeEventLog};

/// Computes environment specific key performance indicators (KPIs) of an episode.
pub trait KpiCalculator<S, E> {
    /// Calculates the KPIs at the end of an episode.
    fn calculate_kpis(&self, episode_event_log: &EpisodeEventLog<E>, last_state: &S) -> Record;
}
