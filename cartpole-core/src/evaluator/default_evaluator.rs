//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{record::Record, Env, Policy};
use anyhow::Result;
use log::info;

/// Runs a fixed number of episodes and reports the average return.
///
/// The average of zero episodes is reported as `0.0`.
///
/// # Examples
///
/// ```ignore
/// let config = CartPoleEnvConfig::default();
/// let mut evaluator = DefaultEvaluator::<CartPoleEnv>::new(&config, 42, 10)?;
///
/// let record = evaluator.evaluate(&mut policy)?;
/// println!("Average return: {}", record.get_scalar("Episode return")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    /// Each episode is started with [`Env::reset_with_index`] using the episode index,
    /// so that repeated evaluations see the same initial states.
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let mut r_total = 0f32;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;
            let mut r_episode = 0f32;

            loop {
                let act = policy.sample(&prev_obs);
                let (step, _) = self.env.step(&act)?;
                r_episode += step.reward;
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }

            info!("Episode {}, return = {}", ix, r_episode);
            r_total += r_episode;
        }

        let mean = if self.n_episodes == 0 {
            0.0
        } else {
            r_total / self.n_episodes as f32
        };
        Ok(Record::from_scalar("Episode return", mean))
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `n_episodes` - Number of episodes to run during evaluation
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
        })
    }

    /// Constructs a new [`DefaultEvaluator`] from an environment.
    pub fn from_env(env: E, n_episodes: usize) -> Self {
        Self { n_episodes, env }
    }
}
