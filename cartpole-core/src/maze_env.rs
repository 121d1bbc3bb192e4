//! Gym-style wrapper of core environments.
mod config;
use crate::{
    record::Record, ActionConversion, CoreEnv, CoreStep, Env, EpisodeEventLog, KpiCalculator,
    MazeInfo, ObservationConversion, Renderer, Space, Step,
};
use anyhow::Result;
pub use config::MazeEnvConfig;
use log::{debug, trace};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Transforms a [`CoreEnv`] into a trainable, gym-style [`Env`].
///
/// At every step, objects interact as shown below:
///
/// ```mermaid
/// graph LR
///     A[Policy]-->|SpaceAct|B[ActionConversion]
///     B -->|Action|C[CoreEnv]
///     C -->|Events|D[RewardAggregator]
///     D -->|reward|C
///     C -->|State|E[ObservationConversion]
///     E -->|SpaceObs|A
/// ```
///
/// The events of every step are collected into an [`EpisodeEventLog`]. When an episode
/// ends, the record returned by [`Env::step`] contains the KPIs computed by the
/// [`KpiCalculator`] of the core environment together with the episode statistics
/// of the events.
pub struct MazeEnv<C, AC, OC>
where
    C: CoreEnv,
    AC: ActionConversion<C::State, C::Action>,
    OC: ObservationConversion<C::State>,
{
    core_env: C,

    action_conversion: AC,

    observation_conversion: OC,

    episode_event_log: EpisodeEventLog<C::Event>,

    max_episode_steps: Option<usize>,

    render: bool,

    /// Seed given at construction, offset by the index in [`Env::reset_with_index`].
    seed: i64,
}

impl<C, AC, OC> MazeEnv<C, AC, OC>
where
    C: CoreEnv,
    AC: ActionConversion<C::State, C::Action>,
    OC: ObservationConversion<C::State>,
{
    /// The wrapped core environment.
    pub fn core_env(&self) -> &C {
        &self.core_env
    }

    /// The wrapped core environment, mutable.
    pub fn core_env_mut(&mut self) -> &mut C {
        &mut self.core_env
    }

    /// The action space.
    pub fn action_space(&self) -> Space {
        self.action_conversion.space()
    }

    /// The observation space.
    pub fn observation_space(&self) -> Space {
        self.observation_conversion.space()
    }

    /// The action conversion.
    pub fn action_conversion(&self) -> &AC {
        &self.action_conversion
    }

    /// The observation conversion.
    pub fn observation_conversion(&self) -> &OC {
        &self.observation_conversion
    }

    /// The events of the current episode.
    pub fn episode_event_log(&self) -> &EpisodeEventLog<C::Event> {
        &self.episode_event_log
    }

    /// Enables or disables rendering.
    pub fn set_render(&mut self, render: bool) {
        self.render = render;
    }

    /// Releases resources of the core environment.
    pub fn close(&mut self) {
        self.core_env.close();
    }

    fn render_state(&self, state: &C::State, action: Option<&C::Action>) -> Result<()> {
        self.core_env
            .renderer()
            .render(state, action, self.core_env.events())
    }

    fn reset_episode(&mut self) -> Result<OC::SpaceObs> {
        let state = self.core_env.reset();
        self.episode_event_log.clear();
        if self.render {
            self.render_state(&state, None)?;
        }
        Ok(self.observation_conversion.maze_to_space(&state))
    }
}

impl<C, AC, OC> Env for MazeEnv<C, AC, OC>
where
    C: CoreEnv,
    AC: ActionConversion<C::State, C::Action>,
    OC: ObservationConversion<C::State>,
{
    type Config = MazeEnvConfig<C::Config, AC::Config, OC::Config>;
    type Obs = OC::SpaceObs;
    type Act = AC::SpaceAct;
    type Info = MazeInfo;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        debug!("Build MazeEnv with seed {}", seed);
        Ok(Self {
            core_env: C::build(&config.core_env, seed)?,
            action_conversion: AC::build(&config.action_conversion)?,
            observation_conversion: OC::build(&config.observation_conversion)?,
            episode_event_log: EpisodeEventLog::new(),
            max_episode_steps: config.max_episode_steps,
            render: config.render,
            seed,
        })
    }

    fn step(&mut self, act: &Self::Act) -> Result<(Step<Self>, Record)> {
        let state = self.core_env.state();
        let action = self.action_conversion.space_to_maze(act, &state)?;
        let actor_id = self.core_env.actor_id();
        let CoreStep {
            state,
            reward,
            done,
        } = self.core_env.step(&action);

        let events = self.core_env.events();
        let mut record = events.stats();
        self.episode_event_log.push(events.clone());
        let env_time = self.episode_event_log.len();
        trace!("MazeEnv::step(), env_time = {}, state = {:?}", env_time, state);

        if self.render {
            self.render_state(&state, Some(&action))?;
        }

        let is_truncated = !done
            && self
                .max_episode_steps
                .map_or(false, |max_steps| env_time >= max_steps);

        if done || is_truncated {
            let kpis = self
                .core_env
                .kpi_calculator()
                .calculate_kpis(&self.episode_event_log, &state);
            record.merge_inplace(kpis);
            record.merge_inplace(self.episode_event_log.episode_stats());
        }

        let obs = self.observation_conversion.maze_to_space(&state);
        let info = MazeInfo { actor_id, env_time };
        let step = Step::new(obs, act.clone(), reward, done, is_truncated, info);

        Ok((step, record))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        trace!("MazeEnv::reset()");
        self.reset_episode()
    }

    /// Reseeds the core environment with `seed + ix`, then resets it.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.core_env.seed(self.seed + ix as i64);
        self.reset_episode()
    }
}
