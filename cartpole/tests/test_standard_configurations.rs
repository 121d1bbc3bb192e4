//! Rollout jobs of the standard configurations, run with overrides.
use anyhow::Result;
use cartpole::{PolicyConfig, RolloutConfig, RolloutRunner, RolloutSummary};
use cartpole_core::Configurable;
use cartpole_env::KinematicsIntegrator;
use cartpole_policy_no_backend::{MlpPolicy, MlpPolicyConfig};
use std::{fs, path::Path};
use tempdir::TempDir;

const ENV_BASE_SEED: i64 = 698376768;
const AGENT_BASE_SEED: u64 = 2079466554;

fn config(name: &str) -> Result<RolloutConfig> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("configs")
        .join(format!("{}.yaml", name));
    Ok(RolloutConfig::load(path)?
        .env_base_seed(ENV_BASE_SEED)
        .agent_base_seed(AGENT_BASE_SEED))
}

fn run(config: RolloutConfig, log_dir: &Path) -> Result<RolloutSummary> {
    let config = config.log_dir(Some(log_dir.to_string_lossy().to_string()));
    let n_episodes = config.n_episodes;
    let summary = RolloutRunner::build(config).run()?;
    assert_eq!(summary.episodes.len(), n_episodes);

    let tf_summary_files = fs::read_dir(log_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains("events.out.tfevents"))
        .count();
    assert_eq!(
        tf_summary_files, 1,
        "expected exactly 1 tensorboard summary file in {:?}",
        log_dir
    );

    let mut rdr = csv::Reader::from_path(log_dir.join("eval.csv"))?;
    assert_eq!(rdr.records().count(), n_episodes);

    Ok(summary)
}

#[test]
fn test_rollout_random() -> Result<()> {
    let tmp = TempDir::new("rollout_random")?;
    let summary = run(config("rollout_random")?, tmp.path())?;
    assert!(summary.mean_return() > 0.0);
    Ok(())
}

#[test]
fn test_rollout_heuristic() -> Result<()> {
    let tmp = TempDir::new("rollout_heuristic")?;
    run(config("rollout_heuristic")?, tmp.path())?;
    Ok(())
}

#[test]
fn test_rollout_heuristic_render() -> Result<()> {
    let tmp = TempDir::new("rollout_heuristic_render")?;
    let frames = tmp.path().join("frames");
    let config = config("rollout_heuristic")?
        .n_episodes(1)
        .render(true)
        .render_dir(Some(frames.to_string_lossy().to_string()));
    let summary = run(config, &tmp.path().join("logs"))?;

    // The initial state and one frame per step.
    let n_frames = fs::read_dir(frames.join("episode_0000"))?.count();
    assert_eq!(n_frames, summary.episodes[0].episode_length + 1);
    Ok(())
}

#[test]
fn test_rollout_mlp() -> Result<()> {
    let tmp = TempDir::new("rollout_mlp")?;
    run(config("rollout_mlp")?, tmp.path())?;
    Ok(())
}

#[test]
fn test_rollout_mlp_saved_params() -> Result<()> {
    let tmp = TempDir::new("rollout_mlp_saved_params")?;
    let params_path = tmp.path().join("policy.bincode");
    MlpPolicy::build(MlpPolicyConfig::default()).save(&params_path)?;

    let config = config("rollout_mlp")?.policy(PolicyConfig::Mlp {
        hidden_units: vec![128, 128],
        deterministic: true,
        params_path: Some(params_path.to_string_lossy().to_string()),
    });
    run(config, &tmp.path().join("logs"))?;
    Ok(())
}

#[test]
fn test_rollout_wrappers() -> Result<()> {
    let tmp = TempDir::new("rollout_wrappers")?;
    let config = config("rollout_heuristic")?
        .max_episode_steps(Some(20))
        .kinematics_integrator(KinematicsIntegrator::SemiImplicitEuler);
    let summary = run(config, tmp.path())?;
    assert!(summary.episodes.iter().all(|e| e.episode_length <= 20));
    Ok(())
}

#[test]
fn test_rollout_hard() -> Result<()> {
    let tmp = TempDir::new("rollout_hard")?;
    run(config("rollout_hard")?, tmp.path())?;
    Ok(())
}

#[test]
fn test_heuristic_beats_random() -> Result<()> {
    let random = RolloutRunner::build(config("rollout_random")?.n_episodes(20)).run()?;
    let heuristic = RolloutRunner::build(config("rollout_heuristic")?.n_episodes(20)).run()?;
    assert!(heuristic.mean_return() > random.mean_return());
    Ok(())
}
