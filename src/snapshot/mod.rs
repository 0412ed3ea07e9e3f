//! Persistent snapshots of machines and mutants.
//!
//! A snapshot captures a machine together with the fault that produced it,
//! so a mutant found interesting in one run can be reloaded exactly in
//! another. Snapshots serialize to JSON for inspection and to bincode for
//! compact storage; both paths revalidate the machine on load.

use crate::core::Machine;
use crate::mutation::{Mutant, Mutation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// How a snapshotted mutant was derived.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// The fault applied to the reference
    pub mutation: Mutation,

    /// Seed of the random source that drew the fault, if any
    pub seed: Option<u64>,
}

/// Serializable snapshot of a machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When snapshot was created
    pub timestamp: DateTime<Utc>,

    /// The machine itself
    pub machine: Machine,

    /// Present when the machine is a mutant
    pub provenance: Option<Provenance>,
}

impl MachineSnapshot {
    /// Snapshot a reference machine.
    pub fn new(machine: Machine) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            machine,
            provenance: None,
        }
    }

    /// Snapshot a mutant, recording its fault and the seed that drew it.
    pub fn from_mutant(mutant: Mutant, seed: Option<u64>) -> Self {
        Self {
            provenance: Some(Provenance {
                mutation: mutant.mutation,
                seed,
            }),
            ..Self::new(mutant.machine)
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{mutate, MutationKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn toggle_machine() -> Machine {
        Machine::build(
            2,
            2,
            2,
            0,
            [(0, 0, 1, 0), (0, 1, 0, 1), (1, 0, 0, 1), (1, 1, 1, 0)],
        )
        .unwrap()
    }

    fn split_snapshot() -> MachineSnapshot {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mutant = mutate(&toggle_machine(), MutationKind::StateSplit, &mut rng).unwrap();
        MachineSnapshot::from_mutant(mutant, Some(12))
    }

    #[test]
    fn json_snapshot_restores_mutant() {
        let snapshot = split_snapshot();
        let json = snapshot.to_json().unwrap();
        let restored = MachineSnapshot::from_json(&json).unwrap();

        assert_eq!(restored, snapshot);
        assert_eq!(restored.machine.num_states(), 3);
        assert_eq!(
            restored.provenance.map(|p| p.mutation.kind()),
            Some(MutationKind::StateSplit)
        );
    }

    #[test]
    fn binary_snapshot_restores_mutant() {
        let snapshot = split_snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        let restored = MachineSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn reference_snapshot_has_no_provenance() {
        let snapshot = MachineSnapshot::new(toggle_machine());
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert!(snapshot.provenance.is_none());
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut snapshot = MachineSnapshot::new(toggle_machine());
        snapshot.version = 99;
        let json = snapshot.to_json().unwrap();

        assert_eq!(
            MachineSnapshot::from_json(&json),
            Err(SnapshotError::UnsupportedVersion {
                found: 99,
                supported: SNAPSHOT_VERSION
            })
        );
    }

    #[test]
    fn rejects_invalid_machine() {
        let snapshot = MachineSnapshot::new(toggle_machine());
        let json = snapshot
            .to_json()
            .unwrap()
            .replace("\"initial_state\": 0", "\"initial_state\": 5");

        assert!(matches!(
            MachineSnapshot::from_json(&json),
            Err(SnapshotError::DeserializationFailed(_))
        ));
    }
}
