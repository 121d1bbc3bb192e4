use crate::{CartPolePolicy, RolloutConfig};
use anyhow::Result;
use cartpole_core::{
    record::{AggregateRecorder, NullRecorder, Record, RecordStorage, RecordValue, Recorder},
    util, Env,
};
use cartpole_env::CartPoleEnv;
use cartpole_tensorboard::TensorboardRecorder;
use log::info;
use serde::Serialize;
use std::{convert::TryFrom, fs, path::Path};

/// Values of an episode, a row of `eval.csv`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EpisodeSummary {
    /// Index of the episode.
    pub episode: usize,

    /// Sum of rewards.
    pub episode_return: f32,

    /// The number of steps.
    pub episode_length: usize,

    /// Average cart velocity per step.
    pub average_cart_velocity_per_step: f32,

    /// `true` if the episode was cut at the maximum number of steps.
    pub truncated: bool,
}

impl TryFrom<&Record> for EpisodeSummary {
    type Error = anyhow::Error;

    fn try_from(record: &Record) -> Result<Self> {
        Ok(Self {
            episode: record.get_scalar("episode")? as _,
            episode_return: record.get_scalar("episode_return")?,
            episode_length: record.get_scalar("episode_length")? as _,
            average_cart_velocity_per_step: record.get_scalar("average_cart_velocity_per_step")?,
            // Terminated episodes end with at least one termination event.
            truncated: record.get_scalar("cart_moved_away").unwrap_or(0.0)
                + record.get_scalar("pole_fell_over").unwrap_or(0.0)
                == 0.0,
        })
    }
}

/// Result of [`RolloutRunner::run`].
#[derive(Clone, Debug)]
pub struct RolloutSummary {
    /// Values of the individual episodes.
    pub episodes: Vec<EpisodeSummary>,

    /// Aggregate of the records of all episodes, see
    /// [`RecordStorage::aggregate`](cartpole_core::record::RecordStorage::aggregate).
    pub aggregate: Record,
}

impl RolloutSummary {
    /// Mean of the episode returns.
    pub fn mean_return(&self) -> f32 {
        if self.episodes.is_empty() {
            return 0.0;
        }
        self.episodes.iter().map(|e| e.episode_return).sum::<f32>() / self.episodes.len() as f32
    }

    /// Writes the episodes as CSV.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        for episode in self.episodes.iter() {
            wtr.serialize(episode)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Runs a policy on the CartPole environment for a number of episodes.
pub struct RolloutRunner {
    config: RolloutConfig,
}

impl RolloutRunner {
    /// Creates a runner.
    pub fn build(config: RolloutConfig) -> Self {
        Self { config }
    }

    /// The configuration of the job.
    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Runs the job.
    ///
    /// If a log directory is configured, records are written to a TensorBoard event
    /// file and the episodes to `eval.csv` in that directory.
    pub fn run(&self) -> Result<RolloutSummary> {
        match &self.config.log_dir {
            Some(log_dir) => {
                fs::create_dir_all(log_dir)?;
                let mut recorder = TensorboardRecorder::new(log_dir);
                let summary = self.run_with_recorder(&mut recorder)?;
                let csv_path = Path::new(log_dir).join("eval.csv");
                summary.write_csv(&csv_path)?;
                info!("Wrote episodes to {:?}", csv_path);
                Ok(summary)
            }
            None => self.run_with_recorder(&mut NullRecorder::new()),
        }
    }

    /// Runs the job, writing the record of every episode to `recorder`.
    ///
    /// After the last episode, the aggregate of the records is flushed with the
    /// number of episodes as the step.
    pub fn run_with_recorder<R>(&self, recorder: &mut R) -> Result<RolloutSummary>
    where
        R: Recorder + AggregateRecorder,
    {
        let config = &self.config;
        let env_config = config.env.clone().render(config.render);
        let mut env = CartPoleEnv::build(&env_config, config.seeding.env_base_seed)?;
        let mut policy = CartPolePolicy::build(&config.policy, config.seeding.agent_base_seed)?;
        let mut storage = RecordStorage::new();
        let mut episodes = Vec::with_capacity(config.n_episodes);

        info!(
            "Start rollout of {:?} policy, {} episodes",
            config.policy, config.n_episodes
        );

        for episode in 0..config.n_episodes {
            let mut record = util::run_episode(&mut env, &mut policy, episode)?;
            record.insert("episode", RecordValue::Scalar(episode as _));
            let summary = EpisodeSummary::try_from(&record)?;
            info!(
                "Episode {}: return = {}, length = {}",
                episode, summary.episode_return, summary.episode_length
            );

            episodes.push(summary);
            storage.store(record.clone());
            recorder.write(record.clone());
            recorder.store(record);
        }
        env.close();
        recorder.flush(config.n_episodes as _);

        let summary = RolloutSummary {
            episodes,
            aggregate: storage.aggregate(),
        };
        info!(
            "Finished rollout, mean return = {}",
            summary.mean_return()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PolicyConfig;
    use cartpole_core::record::{BufferedRecorder, RecordValue};

    fn episode_record(events: &[&str]) -> Record {
        let mut record = Record::from_slice(&[
            ("episode", RecordValue::Scalar(0.0)),
            ("episode_return", RecordValue::Scalar(12.0)),
            ("episode_length", RecordValue::Scalar(12.0)),
            ("average_cart_velocity_per_step", RecordValue::Scalar(0.1)),
        ]);
        for name in events {
            record.insert(*name, RecordValue::Scalar(1.0));
        }
        record
    }

    #[test]
    fn test_episode_summary_truncated_flag() -> Result<()> {
        let both = episode_record(&["cart_moved_away", "pole_fell_over"]);
        assert!(!EpisodeSummary::try_from(&both)?.truncated);
        let fallen = episode_record(&["pole_fell_over"]);
        assert!(!EpisodeSummary::try_from(&fallen)?.truncated);
        assert!(EpisodeSummary::try_from(&episode_record(&[]))?.truncated);
        Ok(())
    }

    #[test]
    fn test_run_with_recorder() -> Result<()> {
        let config = RolloutConfig::default()
            .policy(PolicyConfig::Heuristic)
            .n_episodes(3);
        let mut recorder = BufferedRecorder::new();
        let summary = RolloutRunner::build(config).run_with_recorder(&mut recorder)?;

        // Three episodes and the aggregate.
        assert_eq!(recorder.len(), 4);
        assert_eq!(summary.episodes.len(), 3);
        for (i, e) in summary.episodes.iter().enumerate() {
            assert_eq!(e.episode, i);
            assert_eq!(e.episode_return, e.episode_length as f32);
        }
        assert!(summary.aggregate.get_scalar("episode_return_mean").is_ok());
        assert!(summary
            .aggregate
            .get_scalar("average_cart_velocity_per_step_mean")
            .is_ok());
        Ok(())
    }

    #[test]
    fn test_reproducible() -> Result<()> {
        let config = RolloutConfig::default().n_episodes(3);
        let s1 = RolloutRunner::build(config.clone()).run()?;
        let s2 = RolloutRunner::build(config).run()?;
        assert_eq!(s1.episodes, s2.episodes);
        Ok(())
    }

    #[test]
    fn test_truncation() -> Result<()> {
        let config = RolloutConfig::default()
            .policy(PolicyConfig::Heuristic)
            .max_episode_steps(Some(5))
            .n_episodes(2);
        let summary = RolloutRunner::build(config).run()?;
        for e in summary.episodes.iter() {
            assert_eq!(e.episode_length, 5);
            assert!(e.truncated);
        }
        Ok(())
    }
}
