//! Utilities for interaction of policies and environments.
use crate::{
    record::{Record, RecordValue},
    Env, Policy,
};
use anyhow::Result;
use chrono::Local;
use log::debug;

/// Runs a single episode started with [`Env::reset_with_index`].
///
/// Returns a record with `"episode_return"`, `"episode_length"`, the end time of the
/// episode as `"datetime"` and the values the environment reported at the end of the
/// episode, e.g., KPIs.
pub fn run_episode<E, P>(env: &mut E, policy: &mut P, ix: usize) -> Result<Record>
where
    E: Env,
    P: Policy<E>,
{
    let mut prev_obs = env.reset_with_index(ix)?;
    let mut r_total = 0f32;
    let mut n_steps = 0usize;

    let mut record = loop {
        let act = policy.sample(&prev_obs);
        let (step, record) = env.step(&act)?;
        r_total += step.reward;
        n_steps += 1;
        if step.is_done() {
            break record;
        }
        prev_obs = step.obs;
    };
    debug!("Episode {}, {} steps, return = {}", ix, n_steps, r_total);

    record.insert("episode_return", RecordValue::Scalar(r_total));
    record.insert("episode_length", RecordValue::Scalar(n_steps as f32));
    record.insert("datetime", RecordValue::DateTime(Local::now()));
    Ok(record)
}
