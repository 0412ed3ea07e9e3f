//! Simulation errors.

use crate::core::{InputSymbol, StateId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The simulator reached a `(state, input)` pair with no defined transition.
///
/// `position` is the zero-based index of the offending input since the last
/// reset. The simulator's current state is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("No transition from state {state} on input {input} (position {position})")]
pub struct NoTransitionError {
    pub state: StateId,
    pub input: InputSymbol,
    pub position: usize,
}
