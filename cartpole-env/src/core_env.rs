//! Simulation of the cart-pole system.
mod config;
use crate::{
    physics, CartPoleEvent, CartPoleKpiCalculator, CartPoleMazeAction, CartPoleMazeState,
    CartPoleRenderer, CartPoleRewardAggregator,
};
use anyhow::Result;
use cartpole_core::{CoreEnv, CoreStep, RewardAggregator, StepEventLog};
pub use config::CartPoleCoreEnvConfig;
use log::trace;
use rand::{rngs::StdRng, SeedableRng};

/// Core environment of the CartPole task.
///
/// Holds the state, the random number generator for initial states, and the events
/// of the last step.
pub struct CartPoleCoreEnv {
    config: CartPoleCoreEnvConfig,
    rng: StdRng,
    state: CartPoleMazeState,
    env_time: usize,
    events: StepEventLog<CartPoleEvent>,
    reward_aggregator: CartPoleRewardAggregator,
    kpi_calculator: CartPoleKpiCalculator,
    renderer: CartPoleRenderer,
}

impl CartPoleCoreEnv {
    /// The number of steps taken since the last reset.
    pub fn env_time(&self) -> usize {
        self.env_time
    }

    /// The reward aggregator.
    pub fn reward_aggregator(&self) -> &CartPoleRewardAggregator {
        &self.reward_aggregator
    }

    /// Overwrites the current state.
    pub fn set_state(&mut self, state: CartPoleMazeState) {
        self.state = state;
    }
}

impl CoreEnv for CartPoleCoreEnv {
    type Config = CartPoleCoreEnvConfig;
    type State = CartPoleMazeState;
    type Action = CartPoleMazeAction;
    type Event = CartPoleEvent;
    type Renderer = CartPoleRenderer;
    type KpiCalculator = CartPoleKpiCalculator;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let state = CartPoleMazeState::sample(&mut rng);
        let renderer = CartPoleRenderer::new(
            config.physics.length,
            config.x_threshold,
            config.render_dir.as_ref().map(Into::into),
        );

        Ok(Self {
            config: config.clone(),
            rng,
            state,
            env_time: 0,
            events: StepEventLog::new(0),
            reward_aggregator: CartPoleRewardAggregator::new(),
            kpi_calculator: CartPoleKpiCalculator,
            renderer,
        })
    }

    fn step(&mut self, action: &CartPoleMazeAction) -> CoreStep<CartPoleMazeState> {
        self.state = physics::step(&self.state, action.is_push_right(), &self.config.physics);
        self.env_time += 1;

        let termination = physics::termination(
            &self.state,
            self.config.x_threshold,
            self.config.theta_threshold_radians,
        );

        self.events = StepEventLog::new(self.env_time);
        if termination.cart_moved_away {
            self.events.push(CartPoleEvent::CartMovedAway);
        }
        if termination.pole_fell_over {
            self.events.push(CartPoleEvent::PoleFellOver);
        }
        self.events.push(CartPoleEvent::CartVelocity {
            velocity: self.state.cart_velocity,
        });

        let rewards = self.reward_aggregator.summarize_reward(&self.events);
        let reward = self.reward_aggregator.to_scalar_reward(&rewards);
        trace!(
            "CartPoleCoreEnv::step(), env_time = {}, action = {:?}, reward = {}",
            self.env_time,
            action,
            reward
        );

        CoreStep {
            state: self.state,
            reward,
            done: termination.is_done() || self.reward_aggregator.steps_beyond_done().is_some(),
        }
    }

    fn reset(&mut self) -> CartPoleMazeState {
        self.state = CartPoleMazeState::sample(&mut self.rng);
        self.env_time = 0;
        self.events = StepEventLog::new(0);
        self.reward_aggregator.reset();
        self.state
    }

    fn seed(&mut self, seed: i64) {
        self.rng = StdRng::seed_from_u64(seed as u64);
    }

    fn state(&self) -> CartPoleMazeState {
        self.state
    }

    fn events(&self) -> &StepEventLog<CartPoleEvent> {
        &self.events
    }

    fn renderer(&self) -> &CartPoleRenderer {
        &self.renderer
    }

    fn kpi_calculator(&self) -> &CartPoleKpiCalculator {
        &self.kpi_calculator
    }
}
