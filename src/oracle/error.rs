//! Oracle and harness errors.

use crate::mutation::MutationError;
use crate::simulator::NoTransitionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A replay failed on one side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ReplayError {
    #[error("Reference replay failed: {0}")]
    Reference(NoTransitionError),

    #[error("Mutant replay failed: {0}")]
    Mutant(NoTransitionError),
}

/// A single trial of a statistical run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Trial {trial} failed: {source}")]
pub struct TrialError {
    pub trial: usize,
    pub source: ReplayError,
}

/// Errors that can occur while estimating detection ratios.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Trial(#[from] TrialError),

    #[error("Cannot generate {length} input symbols from an empty input alphabet")]
    EmptyInputAlphabet { length: usize },

    #[error(transparent)]
    Mutation(#[from] MutationError),
}
