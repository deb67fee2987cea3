//! Dense action-value and visit-count tables

use crate::types::{Action, NUM_ACTIONS, STATE_SPACE_SIZE, StateIndex};

/// Q-table over the full discrete state space.
///
/// Q-values and visit counts are stored as two parallel dense arrays with one
/// row per [`StateIndex`], so every addressable entry is always defined.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    /// Learned action-values, one row per state
    q_values: Vec<[f64; NUM_ACTIONS]>,
    /// Update counts per (state, action)
    visits: Vec<[u32; NUM_ACTIONS]>,
    /// Learning-rate constant
    lpc: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zeroed Q-table. `lpc` is assumed to be validated by the caller.
    pub fn new(lpc: f64, discount_factor: f64) -> Self {
        Self {
            q_values: vec![[0.0; NUM_ACTIONS]; STATE_SPACE_SIZE],
            visits: vec![[0; NUM_ACTIONS]; STATE_SPACE_SIZE],
            lpc,
            discount_factor,
        }
    }

    /// Action-values of a state, in [`Action::ALL`] order.
    pub fn values(&self, state: StateIndex) -> &[f64; NUM_ACTIONS] {
        &self.q_values[state.get()]
    }

    /// Visit counts of a state, in [`Action::ALL`] order.
    pub fn visits(&self, state: StateIndex) -> &[u32; NUM_ACTIONS] {
        &self.visits[state.get()]
    }

    pub fn get(&self, state: StateIndex, action: Action) -> f64 {
        self.q_values[state.get()][action.index()]
    }

    pub fn set(&mut self, state: StateIndex, action: Action, value: f64) {
        self.q_values[state.get()][action.index()] = value;
    }

    /// Maximum action-value of a state
    pub fn max_value(&self, state: StateIndex) -> f64 {
        self.values(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Learning rate the next update of `(state, action)` would use.
    pub fn learning_rate(&self, state: StateIndex, action: Action) -> f64 {
        let visits = self.visits[state.get()][action.index()];
        self.lpc / (self.lpc + f64::from(visits))
    }

    /// Q-learning update with a visit-count learning rate.
    ///
    /// lr = lpc / (lpc + N(s,a)), taken before N(s,a) is incremented
    /// Q(s,a) ← Q(s,a) + lr [r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Returns the learning rate that was applied.
    pub fn update(
        &mut self,
        state: StateIndex,
        action: Action,
        reward: f64,
        next_state: StateIndex,
    ) -> f64 {
        let lr = self.learning_rate(state, action);
        let visits = &mut self.visits[state.get()][action.index()];
        *visits = visits.saturating_add(1);

        let td_target = reward + self.discount_factor * self.max_value(next_state);
        let current_q = self.get(state, action);
        self.set(state, action, current_q + lr * (td_target - current_q));
        lr
    }

    /// Zero every Q-value and visit count.
    pub fn reset(&mut self) {
        self.q_values.fill([0.0; NUM_ACTIONS]);
        self.visits.fill([0; NUM_ACTIONS]);
    }

    /// Replace all Q-values wholesale. Visit counts restart from zero because
    /// they are not part of the stored model.
    pub(crate) fn replace_values(&mut self, q_values: Vec<[f64; NUM_ACTIONS]>) {
        debug_assert_eq!(q_values.len(), STATE_SPACE_SIZE);
        self.q_values = q_values;
        self.visits.fill([0; NUM_ACTIONS]);
    }

    /// Iterate `(state, values)` over the whole table.
    pub fn rows(&self) -> impl Iterator<Item = (StateIndex, &[f64; NUM_ACTIONS])> {
        StateIndex::all().zip(self.q_values.iter())
    }

    /// Number of states with at least one recorded update.
    pub fn visited_states(&self) -> usize {
        self.visits
            .iter()
            .filter(|row| row.iter().any(|&n| n > 0))
            .count()
    }

    /// Number of states holding at least one non-zero Q-value.
    pub fn nonzero_states(&self) -> usize {
        self.q_values
            .iter()
            .filter(|row| row.iter().any(|&q| q != 0.0))
            .count()
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn lpc(&self) -> f64 {
        self.lpc
    }
}
