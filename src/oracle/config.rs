//! Harness configuration.

use crate::mutation::SplitPolicy;
use serde::{Deserialize, Serialize};

/// Configuration for a parallel statistical run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Length of every random input sequence.
    pub sequence_length: usize,
    /// Number of random sequences per mutant.
    pub trial_count: usize,
    /// Master seed; every trial derives its own source from it.
    pub seed: u64,
    /// Worker threads. Results do not depend on this value.
    pub workers: usize,
    /// Reconnection policy used for state-split mutants.
    pub split_policy: SplitPolicy,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            sequence_length: 16,
            trial_count: 1_000,
            seed: 42,
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            split_policy: SplitPolicy::default(),
        }
    }
}

/// Derive an independent seed for `(stream, index)` from a master seed.
///
/// SplitMix64 finalizer over the combined inputs; distinct streams and
/// indices give unrelated seeds.
pub(crate) fn derive_seed(seed: u64, stream: u64, index: u64) -> u64 {
    let mut z = seed
        ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ index.wrapping_add(1).wrapping_mul(0xD1B5_4A32_D192_ED03);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
