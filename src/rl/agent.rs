//! Tabular Q-learning agent
//!
//! Implements epsilon-greedy action selection over a sparse Q-table and the
//! one-step Q-learning update. Every transition is learned from immediately;
//! there is no replay buffer and no batching.

use rand::Rng;

use super::config::QLearningConfig;
use super::observation::StateEncoding;
use super::q_table::QTable;
use crate::error::ConfigError;
use crate::game::Action;

/// Epsilon-greedy tabular Q-learner
///
/// # Example
///
/// ```rust
/// use q_snake::game::Action;
/// use q_snake::rl::{QLearningAgent, QLearningConfig, StateEncoding};
///
/// let mut agent = QLearningAgent::new(QLearningConfig::default()).unwrap();
/// let s = StateEncoding::from_features([false; 11]);
///
/// agent.learn(&s, Action::Straight, 10.0, &s);
/// assert!((agent.q_value(&s, Action::Straight) - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    table: QTable,
    config: QLearningConfig,
    updates: u64,
}

impl QLearningAgent {
    pub fn new(config: QLearningConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            table: QTable::with_capacity_limit(config.max_table_entries),
            config,
            updates: 0,
        })
    }

    /// Pick an action for `state`
    ///
    /// With probability `exploration_rate` the action is uniformly random;
    /// otherwise it is greedy with uniform tie-breaking.
    pub fn choose_action<R: Rng + ?Sized>(&self, state: &StateEncoding, rng: &mut R) -> Action {
        if rng.gen_bool(f64::from(self.config.exploration_rate)) {
            return Action::ALL[rng.gen_range(0..Action::COUNT)];
        }

        self.greedy_action(state, rng)
    }

    /// Best-valued action, chosen uniformly among all actions tied at the max
    pub fn greedy_action<R: Rng + ?Sized>(&self, state: &StateEncoding, rng: &mut R) -> Action {
        let values = self.table.action_values(state);
        let max_q = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let mut best = [Action::Straight; Action::COUNT];
        let mut n_best = 0;
        for (action, &q) in Action::ALL.iter().zip(values.iter()) {
            if q == max_q {
                best[n_best] = *action;
                n_best += 1;
            }
        }

        // NaN never compares equal; fall back to a uniform pick
        if n_best == 0 {
            return Action::ALL[rng.gen_range(0..Action::COUNT)];
        }

        best[rng.gen_range(0..n_best)]
    }

    /// One-step Q-learning update, returning the new value of `(state, action)`
    ///
    /// `Q(s,a) += alpha * (reward + gamma * max_a' Q(s',a') - Q(s,a))`
    pub fn learn(
        &mut self,
        state: &StateEncoding,
        action: Action,
        reward: f32,
        next_state: &StateEncoding,
    ) -> f32 {
        let old_q = self.table.get(state, action);
        let next_max_q = self.table.max_value(next_state);
        let target = reward + self.config.discount_factor * next_max_q;
        let new_q = old_q + self.config.learning_rate * (target - old_q);

        self.table.set(*state, action, new_q);
        self.updates += 1;

        new_q
    }

    pub fn q_value(&self, state: &StateEncoding, action: Action) -> f32 {
        self.table.get(state, action)
    }

    pub fn q_values(&self, state: &StateEncoding) -> [f32; Action::COUNT] {
        self.table.action_values(state)
    }

    /// Number of (state, action) entries stored so far
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Total number of updates applied
    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::observation::FEATURE_COUNT;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state(idx: usize) -> StateEncoding {
        let mut features = [false; FEATURE_COUNT];
        features[idx % FEATURE_COUNT] = true;
        StateEncoding::from_features(features)
    }

    fn greedy_agent() -> QLearningAgent {
        QLearningAgent::new(QLearningConfig {
            exploration_rate: 0.0,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = QLearningConfig {
            discount_factor: 2.0,
            ..Default::default()
        };
        assert!(QLearningAgent::new(config).is_err());
    }

    #[test]
    fn test_learn_applies_update_rule() {
        let mut agent = greedy_agent();
        let (s, s2) = (state(0), state(1));

        // Seed the next state so the bootstrap term is non-zero
        agent.learn(&s2, Action::TurnLeft, 20.0, &s);
        let next_max = agent.q_value(&s2, Action::TurnLeft);
        assert!((next_max - 2.0).abs() < 1e-6);

        let new_q = agent.learn(&s, Action::Straight, -1.0, &s2);
        let expected = 0.0 + 0.1 * (-1.0 + 0.9 * next_max - 0.0);
        assert!((new_q - expected).abs() < 1e-6);
        assert_eq!(agent.q_value(&s, Action::Straight), new_q);
    }

    #[test]
    fn test_learn_only_touches_one_entry() {
        let mut agent = greedy_agent();
        let (s, s2) = (state(2), state(3));

        agent.learn(&s, Action::TurnRight, 10.0, &s2);

        assert_eq!(agent.q_value(&s, Action::Straight), 0.0);
        assert_eq!(agent.q_value(&s, Action::TurnLeft), 0.0);
        assert_eq!(agent.q_values(&s2), [0.0; 3]);
        assert_eq!(agent.table_len(), 1);
        assert_eq!(agent.updates(), 1);
    }

    #[test]
    fn test_repeated_updates_converge_to_target() {
        let mut agent = greedy_agent();
        let (s, s2) = (state(4), state(5));

        for _ in 0..500 {
            agent.learn(&s, Action::Straight, -10.0, &s2);
        }

        assert!((agent.q_value(&s, Action::Straight) + 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_greedy_picks_strict_maximum() {
        let mut agent = greedy_agent();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let s = state(6);

        agent.learn(&s, Action::TurnLeft, 5.0, &state(7));
        agent.learn(&s, Action::Straight, -5.0, &state(7));

        for _ in 0..100 {
            assert_eq!(agent.choose_action(&s, &mut rng), Action::TurnLeft);
        }
    }

    #[test]
    fn test_ties_are_broken_uniformly() {
        let agent = greedy_agent();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let s = state(8);
        let mut counts = [0usize; Action::COUNT];

        for _ in 0..3000 {
            counts[agent.choose_action(&s, &mut rng).index()] += 1;
        }

        for count in counts {
            assert!(count > 800, "tie-breaking is skewed: {counts:?}");
        }
    }

    #[test]
    fn test_ties_only_among_maxima() {
        let mut agent = greedy_agent();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let s = state(9);

        agent.learn(&s, Action::TurnRight, -1.0, &state(10));

        let mut seen = [false; Action::COUNT];
        for _ in 0..200 {
            let action = agent.choose_action(&s, &mut rng);
            assert_ne!(action, Action::TurnRight);
            seen[action.index()] = true;
        }
        assert!(seen[Action::Straight.index()]);
        assert!(seen[Action::TurnLeft.index()]);
    }

    #[test]
    fn test_full_exploration_ignores_values() {
        let mut agent = QLearningAgent::new(QLearningConfig {
            exploration_rate: 1.0,
            ..Default::default()
        })
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let s = state(0);
        agent.learn(&s, Action::Straight, 100.0, &state(1));

        let picked_other = (0..200)
            .map(|_| agent.choose_action(&s, &mut rng))
            .any(|a| a != Action::Straight);
        assert!(picked_other);
    }

    #[test]
    fn test_capped_table_still_updates_known_keys() {
        let mut agent = QLearningAgent::new(QLearningConfig {
            max_table_entries: Some(1),
            ..Default::default()
        })
        .unwrap();
        let (s, s2) = (state(0), state(1));

        agent.learn(&s, Action::Straight, 10.0, &s2);
        agent.learn(&s, Action::TurnLeft, 10.0, &s2);
        agent.learn(&s, Action::Straight, 10.0, &s2);

        assert_eq!(agent.table_len(), 1);
        assert_eq!(agent.q_value(&s, Action::TurnLeft), 0.0);
        assert!((agent.q_value(&s, Action::Straight) - 1.9).abs() < 1e-5);
    }
}
