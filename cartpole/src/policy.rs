use crate::PolicyConfig;
use anyhow::Result;
use cartpole_core::Policy;
use cartpole_env::{CartPoleAct, CartPoleEnv, CartPoleHeuristicPolicy, CartPoleObs, RandomPolicy};
use cartpole_policy_no_backend::{MlpPolicy, MlpPolicyConfig};

/// Any of the policies a rollout can run.
pub enum CartPolePolicy {
    /// See [`RandomPolicy`].
    Random(RandomPolicy),

    /// See [`CartPoleHeuristicPolicy`].
    Heuristic(CartPoleHeuristicPolicy),

    /// See [`MlpPolicy`].
    Mlp(MlpPolicy),
}

impl CartPolePolicy {
    /// Builds the policy. `seed` is used by stochastic policies.
    pub fn build(config: &PolicyConfig, seed: u64) -> Result<Self> {
        let policy = match config {
            PolicyConfig::Random => Self::Random(RandomPolicy::new(seed)),
            PolicyConfig::Heuristic => Self::Heuristic(CartPoleHeuristicPolicy),
            PolicyConfig::Mlp {
                hidden_units,
                deterministic,
                params_path,
            } => match params_path {
                Some(path) => Self::Mlp(MlpPolicy::load(path, *deterministic, seed)?),
                None => Self::Mlp(MlpPolicy::new(
                    MlpPolicyConfig::default()
                        .hidden_units(hidden_units.clone())
                        .deterministic(*deterministic)
                        .seed(seed),
                )?),
            },
        };
        Ok(policy)
    }
}

impl Policy<CartPoleEnv> for CartPolePolicy {
    fn sample(&mut self, obs: &CartPoleObs) -> CartPoleAct {
        match self {
            Self::Random(p) => p.sample(obs),
            Self::Heuristic(p) => p.sample(obs),
            Self::Mlp(p) => p.sample(obs),
        }
    }
}
