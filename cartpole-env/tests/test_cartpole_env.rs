use anyhow::Result;
use cartpole_core::{
    error::CoreError, util, CoreEnv, DefaultEvaluator, Env, Evaluator, Policy,
};
use cartpole_env::{
    CartPoleAct, CartPoleCoreEnvConfig, CartPoleEnv, CartPoleEnvConfig, CartPoleHeuristicPolicy,
    CartPoleMazeState, RandomPolicy, DEFAULT_MAX_EPISODE_STEPS,
};
use tempdir::TempDir;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_episode_record() -> Result<()> {
    init_logger();
    let config = CartPoleCoreEnvConfig::default().into_env_config();
    assert_eq!(config.max_episode_steps, Some(DEFAULT_MAX_EPISODE_STEPS));

    let mut env = CartPoleEnv::build(&config, 0)?;
    let mut policy = RandomPolicy::new(0);
    let mut obs = env.reset_with_index(0)?;
    let mut n_steps = 0;

    let record = loop {
        let (step, record) = env.step(&policy.sample(&obs))?;
        n_steps += 1;
        assert_eq!(step.info.env_time, n_steps);
        assert!(record.get_scalar("cart_velocity").is_ok());
        if step.is_done() {
            assert!(step.is_terminated);
            assert!(!step.is_truncated);
            break record;
        }
        assert!(record.get_scalar("average_cart_velocity_per_step").is_err());
        obs = step.obs;
    };

    // KPIs and episode statistics are added at the end of the episode.
    let total = record.get_scalar("cart_velocity_episode_total")?;
    let avg = record.get_scalar("average_cart_velocity_per_step")?;
    assert!((avg - total / n_steps as f32).abs() < 1e-4);
    let n_terminal = record.get_scalar("cart_moved_away_episode_total").unwrap_or(0.0)
        + record.get_scalar("pole_fell_over_episode_total").unwrap_or(0.0);
    assert!(n_terminal >= 1.0);
    assert_eq!(env.episode_event_log().len(), n_steps);
    Ok(())
}

#[test]
fn test_truncation() -> Result<()> {
    let config = CartPoleEnvConfig::default().max_episode_steps(Some(10));
    let mut env = CartPoleEnv::build(&config, 0)?;
    let mut policy = CartPoleHeuristicPolicy;
    let record = util::run_episode(&mut env, &mut policy, 0)?;
    assert_eq!(record.get_scalar("episode_length")?, 10.0);
    assert_eq!(record.get_scalar("episode_return")?, 10.0);
    assert!(record.get_scalar("average_cart_velocity_per_step").is_ok());
    Ok(())
}

#[test]
fn test_reset_with_index_is_reproducible() -> Result<()> {
    let config = CartPoleEnvConfig::default();
    let mut env1 = CartPoleEnv::build(&config, 10)?;
    let mut env2 = CartPoleEnv::build(&config, 10)?;
    assert_eq!(env1.reset_with_index(3)?, env2.reset_with_index(3)?);
    assert_ne!(env1.reset_with_index(3)?, env1.reset_with_index(4)?);

    let mut p1 = RandomPolicy::new(5);
    let mut p2 = RandomPolicy::new(5);
    let r1 = util::run_episode(&mut env1, &mut p1, 7)?;
    let r2 = util::run_episode(&mut env2, &mut p2, 7)?;
    assert_eq!(r1.get_scalar("episode_return")?, r2.get_scalar("episode_return")?);
    assert_eq!(
        r1.get_scalar("average_cart_velocity_per_step")?,
        r2.get_scalar("average_cart_velocity_per_step")?
    );
    Ok(())
}

#[test]
fn test_invalid_action() -> Result<()> {
    let mut env = CartPoleEnv::build(&CartPoleEnvConfig::default(), 0)?;
    env.reset()?;
    let err = match env.step(&CartPoleAct::from(2)) {
        Ok(_) => panic!("action 2 must be rejected"),
        Err(err) => err,
    };
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::InvalidAction(_))
    ));
    Ok(())
}

#[test]
fn test_step_with_reset() -> Result<()> {
    let mut env = CartPoleEnv::build(&CartPoleEnvConfig::default(), 0)?;
    env.reset()?;
    env.core_env_mut()
        .set_state(CartPoleMazeState::new(0.0, 0.0, 0.3, 0.0));

    let (step, _) = env.step_with_reset(&CartPoleAct::from(1))?;
    assert!(step.is_terminated);
    let init_obs = step.init_obs.expect("initial observation after reset");
    assert!(init_obs.pole_angle.abs() < 0.05);
    assert!(env.episode_event_log().is_empty());
    assert_eq!(env.core_env().state().pole_angle as f32, init_obs.pole_angle);
    Ok(())
}

#[test]
fn test_spaces() -> Result<()> {
    let env = CartPoleEnv::build(&CartPoleCoreEnvConfig::default().into_env_config(), 0)?;
    assert_eq!(env.observation_space().flat_dim(), 4);
    assert!(env
        .action_space()
        .get("action")
        .map_or(false, |s| s.contains_discrete(1)));
    Ok(())
}

#[test]
fn test_default_evaluator() -> Result<()> {
    let config = CartPoleEnvConfig::default().max_episode_steps(Some(50));
    let mut evaluator = DefaultEvaluator::<CartPoleEnv>::new(&config, 0, 3)?;
    let record = evaluator.evaluate(&mut CartPoleHeuristicPolicy)?;
    let ret = record.get_scalar("Episode return")?;
    assert!(ret > 0.0 && ret <= 50.0);
    Ok(())
}

#[test]
fn test_default_evaluator_without_episodes() -> Result<()> {
    let config = CartPoleEnvConfig::default();
    let mut evaluator = DefaultEvaluator::<CartPoleEnv>::new(&config, 0, 0)?;
    let record = evaluator.evaluate(&mut CartPoleHeuristicPolicy)?;
    assert_eq!(record.get_scalar("Episode return")?, 0.0);
    Ok(())
}

#[test]
fn test_terminated_stays_set_after_termination() -> Result<()> {
    let mut env = CartPoleEnv::build(&CartPoleEnvConfig::default(), 0)?;
    env.reset()?;
    env.core_env_mut()
        .set_state(CartPoleMazeState::new(0.0, 0.0, 0.20, 0.6));

    let mut rewards = vec![];
    for _ in 0..10 {
        let (step, _) = env.step(&CartPoleAct::from(1))?;
        assert!(step.is_terminated);
        rewards.push(step.reward);
    }
    assert_eq!(rewards[0], 1.0);
    assert!(rewards[1..].iter().all(|r| *r == 0.0));
    Ok(())
}

#[test]
fn test_config_file() -> Result<()> {
    let tmp = TempDir::new("cartpole_env_config")?;
    let path = tmp.path().join("env.yaml");
    let config = CartPoleCoreEnvConfig::default()
        .x_threshold(1.0)
        .into_env_config()
        .render(true);
    config.save(&path)?;
    let loaded = CartPoleEnvConfig::load(&path)?;
    assert_eq!(loaded, config);
    assert_eq!(loaded.observation_conversion.x_threshold, 1.0);
    Ok(())
}
