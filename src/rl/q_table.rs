use std::collections::HashMap;

use super::observation::StateEncoding;
use crate::game::Action;

/// Sparse table of action values keyed by (state, action)
///
/// Unseen keys read as 0.0. Entries are never evicted; an optional cap only
/// stops new keys from being inserted.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: HashMap<(StateEncoding, Action), f32>,
    max_entries: Option<usize>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_limit(max_entries: Option<usize>) -> Self {
        Self {
            values: HashMap::new(),
            max_entries,
        }
    }

    pub fn get(&self, state: &StateEncoding, action: Action) -> f32 {
        self.values.get(&(*state, action)).copied().unwrap_or(0.0)
    }

    /// Values of every action at `state`, indexed by `Action::index`
    pub fn action_values(&self, state: &StateEncoding) -> [f32; Action::COUNT] {
        Action::ALL.map(|action| self.get(state, action))
    }

    pub fn max_value(&self, state: &StateEncoding) -> f32 {
        self.action_values(state)
            .into_iter()
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Store a value, returning false when the cap kept a new key out
    pub fn set(&mut self, state: StateEncoding, action: Action, value: f32) -> bool {
        let key = (state, action);
        if let Some(slot) = self.values.get_mut(&key) {
            *slot = value;
            return true;
        }

        if self.is_full() {
            return false;
        }

        self.values.insert(key, value);
        true
    }

    pub fn is_full(&self) -> bool {
        self.max_entries
            .is_some_and(|limit| self.values.len() >= limit)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
