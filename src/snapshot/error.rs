//! Snapshot error types.

use thiserror::Error;

/// Why a machine snapshot could not be written or restored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The snapshot could not be encoded as JSON or bincode.
    #[error("Could not encode machine snapshot: {0}")]
    SerializationFailed(String),

    /// The input is not a snapshot, or the machine it carries fails
    /// revalidation (out-of-range ids, duplicate `(state, input)` keys).
    #[error("Could not restore machine snapshot: {0}")]
    DeserializationFailed(String),

    /// Written by a snapshot format this build does not read.
    #[error("Snapshot format v{found} cannot be restored (this build reads v{supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}
