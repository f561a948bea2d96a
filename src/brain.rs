use crate::error::PolicyError;
use crate::game_input::NUM_FEATURES;
use crate::snake::ACTIONS;

pub const NUM_ACTIONS: usize = ACTIONS.len();

/// Genes a policy needs: one weight per (feature, action) pair.
pub const fn total_weights() -> usize {
    NUM_FEATURES * NUM_ACTIONS
}

/// Scores every action as `state · W[:, a]` with `weights` read as a
/// row-major (features x actions) matrix and returns the best index.
/// Equal scores resolve to the lowest index.
pub fn select_action(state: &[f64], weights: &[f64]) -> Result<usize, PolicyError> {
    let expected = state.len() * NUM_ACTIONS;
    if weights.len() != expected {
        return Err(PolicyError::WeightCount { expected, actual: weights.len() });
    }

    let mut scores = [0.0f64; NUM_ACTIONS];
    for (row, &x) in weights.chunks_exact(NUM_ACTIONS).zip(state) {
        for (score, &w) in scores.iter_mut().zip(row) {
            *score += x * w;
        }
    }

    //first max wins
    let mut best = 0;
    for i in 1..NUM_ACTIONS {
        if scores[i] > scores[best] {
            best = i;
        }
    }
    Ok(best)
}

/// A validated weight vector for the standard feature set.
#[derive(Debug, Clone, PartialEq)]
pub struct Brain {
    weights: Vec<f64>,
}

impl Brain {
    pub fn new(weights: Vec<f64>) -> Result<Self, PolicyError> {
        if weights.len() != total_weights() {
            return Err(PolicyError::WeightCount { expected: total_weights(), actual: weights.len() });
        }
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn decide(&self, state: &[f64; NUM_FEATURES]) -> usize {
        // lengths were checked in `new`
        select_action(state, &self.weights).unwrap_or(0)
    }
}
