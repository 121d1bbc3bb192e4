use crate::{CartPoleAct, CartPoleEnv, CartPoleObs};
use cartpole_core::{Configurable, Policy};
use serde::{Deserialize, Serialize};

/// Pushes the cart towards the side the pole leans to.
#[derive(Clone, Copy, Debug, Default)]
pub struct CartPoleHeuristicPolicy;

impl Policy<CartPoleEnv> for CartPoleHeuristicPolicy {
    fn sample(&mut self, obs: &CartPoleObs) -> CartPoleAct {
        CartPoleAct::from((obs.pole_angle > 0.0) as i32)
    }
}

/// Configuration of [`RandomPolicy`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RandomPolicyConfig {
    /// Seed of the random number generator.
    pub seed: u64,
}

/// Samples actions uniformly at random.
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    /// Creates a policy with a seeded random number generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Configurable for RandomPolicy {
    type Config = RandomPolicyConfig;

    fn build(config: Self::Config) -> Self {
        Self::new(config.seed)
    }
}

impl Policy<CartPoleEnv> for RandomPolicy {
    fn sample(&mut self, _obs: &CartPoleObs) -> CartPoleAct {
        CartPoleAct::from(self.rng.usize(0..2) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CartPoleEnvConfig;
    use anyhow::Result;
    use cartpole_core::{util, Env};

    fn mean_episode_length<P: Policy<CartPoleEnv>>(policy: &mut P) -> Result<f32> {
        let config = CartPoleEnvConfig::default().max_episode_steps(Some(500));
        let mut env = CartPoleEnv::build(&config, 0)?;
        let n = 20;
        let mut total = 0.0;
        for ix in 0..n {
            let record = util::run_episode(&mut env, policy, ix)?;
            total += record.get_scalar("episode_length")?;
        }
        Ok(total / n as f32)
    }

    #[test]
    fn test_heuristic_beats_random() -> Result<()> {
        let heuristic = mean_episode_length(&mut CartPoleHeuristicPolicy)?;
        let random = mean_episode_length(&mut RandomPolicy::new(0))?;
        assert!(random < 100.0);
        assert!(heuristic > 1.3 * random);
        Ok(())
    }

    #[test]
    fn test_random_policy_is_seeded() {
        let obs = CartPoleObs::default();
        let mut p1 = RandomPolicy::build(RandomPolicyConfig { seed: 3 });
        let mut p2 = RandomPolicy::new(3);
        let a1: Vec<_> = (0..32).map(|_| p1.sample(&obs).action).collect();
        let a2: Vec<_> = (0..32).map(|_| p2.sample(&obs).action).collect();
        assert_eq!(a1, a2);
        assert!(a1.iter().all(|a| *a == 0 || *a == 1));
        assert!(a1.contains(&0) && a1.contains(&1));
    }
}
