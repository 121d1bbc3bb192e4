use anyhow::Result;
use cartpole::{PolicyConfig, RolloutConfig, RolloutRunner};
use cartpole_env::KinematicsIntegrator;
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyKind {
    Random,
    Heuristic,
    Mlp,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Integrator {
    Euler,
    SemiImplicitEuler,
}

impl From<Integrator> for KinematicsIntegrator {
    fn from(v: Integrator) -> Self {
        match v {
            Integrator::Euler => KinematicsIntegrator::Euler,
            Integrator::SemiImplicitEuler => KinematicsIntegrator::SemiImplicitEuler,
        }
    }
}

/// Runs a policy on the CartPole environment.
///
/// Flags override the values in the configuration file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML configuration of the rollout
    #[arg(short, long)]
    config: Option<String>,

    /// Policy to run
    #[arg(short, long, value_enum)]
    policy: Option<PolicyKind>,

    /// Parameters of the MLP policy, saved with bincode
    #[arg(long)]
    params_path: Option<String>,

    /// Number of episodes
    #[arg(short, long)]
    episodes: Option<usize>,

    /// Seed of the environment
    #[arg(long)]
    env_seed: Option<i64>,

    /// Seed of the policy
    #[arg(long)]
    agent_seed: Option<u64>,

    /// Render every step
    #[arg(long, default_value_t = false)]
    render: bool,

    /// Directory rendered frames are saved to
    #[arg(long)]
    render_dir: Option<String>,

    /// Directory of the TensorBoard event file and eval.csv
    #[arg(long)]
    log_dir: Option<String>,

    /// Maximum number of steps in an episode
    #[arg(long)]
    max_episode_steps: Option<usize>,

    /// Integration scheme of the physics
    #[arg(long, value_enum)]
    integrator: Option<Integrator>,
}

fn rollout_config(args: &Args) -> Result<RolloutConfig> {
    let mut config = match &args.config {
        Some(path) => RolloutConfig::load(path)?,
        None => RolloutConfig::default(),
    };

    if let Some(policy) = args.policy {
        config = config.policy(match policy {
            PolicyKind::Random => PolicyConfig::Random,
            PolicyKind::Heuristic => PolicyConfig::Heuristic,
            PolicyKind::Mlp => PolicyConfig::mlp(),
        });
    }
    if let Some(path) = &args.params_path {
        if let PolicyConfig::Mlp { params_path, .. } = &mut config.policy {
            *params_path = Some(path.clone());
        }
    }
    if let Some(n) = args.episodes {
        config = config.n_episodes(n);
    }
    if let Some(seed) = args.env_seed {
        config = config.env_base_seed(seed);
    }
    if let Some(seed) = args.agent_seed {
        config = config.agent_base_seed(seed);
    }
    if args.render {
        config = config.render(true);
    }
    if args.render_dir.is_some() {
        config = config.render_dir(args.render_dir.clone());
    }
    if args.log_dir.is_some() {
        config = config.log_dir(args.log_dir.clone());
    }
    if args.max_episode_steps.is_some() {
        config = config.max_episode_steps(args.max_episode_steps);
    }
    if let Some(integrator) = args.integrator {
        config = config.kinematics_integrator(integrator.into());
    }

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = rollout_config(&args)?;
    let summary = RolloutRunner::build(config).run()?;
    println!("Mean return over {} episodes: {}", summary.episodes.len(), summary.mean_return());

    Ok(())
}
