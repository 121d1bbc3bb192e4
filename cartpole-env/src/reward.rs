use crate::CartPoleEvent;
use cartpole_core::{RewardAggregator, StepEventLog};
use log::warn;

/// Gives `1.0` for every step up to and including the terminating one.
///
/// Every step taken after the terminating one is rewarded with `0.0`, whether or not
/// the state is back within bounds.
#[derive(Clone, Debug, Default)]
pub struct CartPoleRewardAggregator {
    steps_beyond_done: Option<usize>,
}

impl CartPoleRewardAggregator {
    /// Creates an aggregator for a fresh episode.
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` before termination, then the number of steps taken after the terminal step.
    pub fn steps_beyond_done(&self) -> Option<usize> {
        self.steps_beyond_done
    }
}

impl RewardAggregator<CartPoleEvent> for CartPoleRewardAggregator {
    fn summarize_reward(&mut self, events: &StepEventLog<CartPoleEvent>) -> Vec<f32> {
        if let Some(n) = self.steps_beyond_done {
            if n == 0 {
                warn!(
                    "step() called after the episode returned done; \
                     call reset() before stepping again"
                );
            }
            self.steps_beyond_done = Some(n + 1);
            return vec![0.0];
        }

        if events.query_events(CartPoleEvent::is_terminal).next().is_some() {
            self.steps_beyond_done = Some(0);
        }
        vec![1.0]
    }

    fn reset(&mut self) {
        self.steps_beyond_done = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::{cell::RefCell, sync::Once};

    thread_local! {
        static WARNINGS: RefCell<Vec<String>> = RefCell::new(vec![]);
    }

    /// Collects warnings per test thread.
    struct WarningLog;

    impl Log for WarningLog {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.with(|w| w.borrow_mut().push(record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static WARNING_LOG: WarningLog = WarningLog;
    static INIT: Once = Once::new();

    fn take_warnings() -> Vec<String> {
        INIT.call_once(|| {
            if log::set_logger(&WARNING_LOG).is_ok() {
                log::set_max_level(LevelFilter::Warn);
            }
        });
        WARNINGS.with(|w| w.borrow_mut().drain(..).collect())
    }

    fn log(events: Vec<CartPoleEvent>) -> StepEventLog<CartPoleEvent> {
        let mut log = StepEventLog::new(0);
        events.into_iter().for_each(|e| log.push(e));
        log
    }

    #[test]
    fn test_reward_around_termination() {
        let mut agg = CartPoleRewardAggregator::new();
        let running = log(vec![CartPoleEvent::CartVelocity { velocity: 0.1 }]);
        let fallen = log(vec![
            CartPoleEvent::PoleFellOver,
            CartPoleEvent::CartVelocity { velocity: 0.1 },
        ]);

        assert_eq!(agg.summarize_reward(&running), vec![1.0]);
        assert_eq!(agg.steps_beyond_done(), None);

        assert_eq!(agg.summarize_reward(&fallen), vec![1.0]);
        assert_eq!(agg.steps_beyond_done(), Some(0));

        for n in 1..4 {
            let r = agg.summarize_reward(&fallen);
            assert_eq!(agg.to_scalar_reward(&r), 0.0);
            assert_eq!(agg.steps_beyond_done(), Some(n));
        }

        agg.reset();
        assert_eq!(agg.steps_beyond_done(), None);
        assert_eq!(agg.summarize_reward(&fallen), vec![1.0]);
    }

    #[test]
    fn test_both_terminal_events_count_once() {
        let mut agg = CartPoleRewardAggregator::new();
        let both = log(vec![CartPoleEvent::CartMovedAway, CartPoleEvent::PoleFellOver]);
        assert_eq!(agg.summarize_reward(&both), vec![1.0]);
        assert_eq!(agg.steps_beyond_done(), Some(0));
    }

    #[test]
    fn test_zero_reward_latches_after_termination() {
        let mut agg = CartPoleRewardAggregator::new();
        let running = log(vec![CartPoleEvent::CartVelocity { velocity: 0.0 }]);
        let fallen = log(vec![CartPoleEvent::PoleFellOver]);

        assert_eq!(agg.summarize_reward(&fallen), vec![1.0]);
        // The state may return within bounds, the episode stays over.
        for n in 1..4 {
            assert_eq!(agg.summarize_reward(&running), vec![0.0]);
            assert_eq!(agg.steps_beyond_done(), Some(n));
        }
    }

    #[test]
    fn test_warns_once_per_episode() {
        let mut agg = CartPoleRewardAggregator::new();
        let fallen = log(vec![CartPoleEvent::PoleFellOver]);
        take_warnings();

        agg.summarize_reward(&fallen);
        assert!(take_warnings().is_empty());

        for _ in 0..5 {
            agg.summarize_reward(&fallen);
        }
        let warnings = take_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("reset()"));

        agg.reset();
        for _ in 0..4 {
            agg.summarize_reward(&fallen);
        }
        assert_eq!(take_warnings().len(), 1);
    }
}
