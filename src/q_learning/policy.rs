//! ε-greedy action selection

use rand::{Rng, seq::IndexedRandom};

use crate::{
    q_learning::q_table::QTable,
    types::{Action, StateIndex},
};

/// Pick an action for `state`.
///
/// With probability `epsilon` the action is drawn uniformly from all actions.
/// Otherwise it is drawn uniformly from the actions sharing the maximal
/// Q-value, so ties never favour the lowest index.
pub fn select_action<R: Rng + ?Sized>(
    table: &QTable,
    state: StateIndex,
    epsilon: f64,
    rng: &mut R,
) -> Action {
    if rng.random::<f64>() < epsilon {
        return random_action(rng);
    }
    greedy_action(table, state, rng)
}

/// Uniformly random action.
pub fn random_action<R: Rng + ?Sized>(rng: &mut R) -> Action {
    Action::ALL[rng.random_range(0..Action::ALL.len())]
}

/// Highest-valued action, ties broken uniformly at random.
pub fn greedy_action<R: Rng + ?Sized>(table: &QTable, state: StateIndex, rng: &mut R) -> Action {
    let values = table.values(state);
    let best = table.max_value(state);
    let candidates: Vec<Action> = Action::ALL
        .iter()
        .copied()
        .filter(|action| values[action.index()] == best)
        .collect();

    // Empty only when the row holds NaN
    candidates
        .choose(rng)
        .copied()
        .unwrap_or_else(|| random_action(rng))
}
