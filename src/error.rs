//! Crate-level error type.

use crate::core::FormatError;
use crate::mutation::{InvalidMutationKindError, InvalidSplitPolicyError, MutationError};
use crate::oracle::HarnessError;
use crate::simulator::NoTransitionError;
use crate::snapshot::SnapshotError;
use std::path::PathBuf;
use thiserror::Error;

/// Any error the engine can surface to a caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    NoTransition(#[from] NoTransitionError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error(transparent)]
    InvalidMutationKind(#[from] InvalidMutationKindError),

    #[error(transparent)]
    InvalidSplitPolicy(#[from] InvalidSplitPolicyError),

    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
