//! Logs of events emitted by core environments.
use crate::record::{Record, RecordValue};
use std::{collections::BTreeMap, fmt::Debug};

/// An event emitted by a core environment.
pub trait Event: Clone + Debug {
    /// Name of the event, used as the key of its statistics.
    fn name(&self) -> &'static str;

    /// Value contributed to the statistics of the event.
    ///
    /// Plain occurrences count as `1.0`.
    fn value(&self) -> f32 {
        1.0
    }
}

fn sum_by_name<'a, E, I>(events: I) -> BTreeMap<&'static str, f32>
where
    E: Event + 'a,
    I: Iterator<Item = &'a E>,
{
    let mut sums = BTreeMap::new();
    for e in events {
        *sums.entry(e.name()).or_insert(0f32) += e.value();
    }
    sums
}

/// Events emitted during a single step.
#[derive(Clone, Debug)]
pub struct StepEventLog<E> {
    /// The number of steps taken in the episode when the events were emitted.
    pub env_time: usize,

    events: Vec<E>,
}

impl<E> StepEventLog<E> {
    /// Creates an empty log for the given env time.
    pub fn new(env_time: usize) -> Self {
        Self {
            env_time,
            events: vec![],
        }
    }

    /// Appends an event.
    pub fn push(&mut self, event: E) {
        self.events.push(event);
    }

    /// Iterates over the events in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.events.iter()
    }

    /// Iterates over the events matching the predicate.
    pub fn query_events<'a, F>(&'a self, pred: F) -> impl Iterator<Item = &'a E> + 'a
    where
        F: Fn(&E) -> bool + 'a,
    {
        self.events.iter().filter(move |e| pred(e))
    }

    /// The number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no event was emitted.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<E: Event> StepEventLog<E> {
    /// Statistics of the step, the sum of event values per event name.
    pub fn stats(&self) -> Record {
        let mut record = Record::empty();
        for (name, v) in sum_by_name(self.events.iter()) {
            record.insert(name, RecordValue::Scalar(v));
        }
        record
    }
}

/// Events emitted during an episode, step by step.
#[derive(Clone, Debug)]
pub struct EpisodeEventLog<E> {
    /// Logs of the individual steps.
    pub step_event_logs: Vec<StepEventLog<E>>,
}

impl<E> Default for EpisodeEventLog<E> {
    fn default() -> Self {
        Self {
            step_event_logs: vec![],
        }
    }
}

impl<E> EpisodeEventLog<E> {
    /// Creates an empty episode log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the log of a step.
    pub fn push(&mut self, step_event_log: StepEventLog<E>) {
        self.step_event_logs.push(step_event_log);
    }

    /// The number of steps in the episode.
    pub fn len(&self) -> usize {
        self.step_event_logs.len()
    }

    /// Returns `true` if no step was logged.
    pub fn is_empty(&self) -> bool {
        self.step_event_logs.is_empty()
    }

    /// Removes all steps.
    pub fn clear(&mut self) {
        self.step_event_logs.clear();
    }

    /// Iterates over the events of all steps matching the predicate.
    pub fn query_events<'a, F>(&'a self, pred: F) -> impl Iterator<Item = &'a E> + 'a
    where
        F: Fn(&E) -> bool + 'a,
    {
        self.step_event_logs
            .iter()
            .flat_map(|log| log.iter())
            .filter(move |e| pred(e))
    }
}

impl<E: Event> EpisodeEventLog<E> {
    /// Statistics of the episode, the sum of event values per event name.
    ///
    /// Keys are suffixed with `_episode_total`.
    pub fn episode_stats(&self) -> Record {
        let events = self.step_event_logs.iter().flat_map(|log| log.iter());
        let mut record = Record::empty();
        for (name, v) in sum_by_name(events) {
            record.insert(format!("{}_episode_total", name), RecordValue::Scalar(v));
        }
        record
    }
}
