//! Mutation error types.

use super::kind::MutationKind;
use crate::core::{FormatError, StateId};
use thiserror::Error;

/// The machine is too small to admit a distinct alternative for the
/// requested operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DegenerateMutationError {
    #[error("Target mutation needs at least 2 states, machine has {num_states}")]
    SingleState { num_states: usize },

    #[error("Output mutation needs at least 2 output symbols, machine has {num_outputs}")]
    SingleOutput { num_outputs: usize },

    #[error("{kind} mutation needs at least one transition")]
    NoTransitions { kind: MutationKind },

    #[error("State split needs a state with at least one incoming transition")]
    NoIncomingTransitions,

    #[error("State {state} has no incoming transition to redirect")]
    Unreachable { state: StateId },
}

/// Unrecognized mutation selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown mutation kind '{selector}' (expected target, output or split)")]
pub struct InvalidMutationKindError {
    pub selector: String,
}

/// Unrecognized state-split policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown split policy '{selector}' (expected first or all)")]
pub struct InvalidSplitPolicyError {
    pub selector: String,
}

/// Errors that can occur when deriving or applying a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error(transparent)]
    Degenerate(#[from] DegenerateMutationError),

    #[error("Transition index {index} out of range (machine has {count} transitions)")]
    TransitionOutOfRange { index: usize, count: usize },

    #[error("{what} {value} out of range (limit {limit})")]
    ValueOutOfRange {
        what: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("Mutation leaves transition {index} unchanged")]
    Unchanged { index: usize },

    #[error("Cannot add a state to a machine with {num_states} states")]
    StateCountOverflow { num_states: usize },

    #[error("Mutant violates machine invariants: {0}")]
    Format(#[from] FormatError),
}
