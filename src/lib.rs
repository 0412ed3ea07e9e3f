//! Mealy Mutant: mutation-based conformance testing for Mealy machines
//!
//! Given a reference machine, the engine simulates its input/output
//! behavior, derives mutants that each carry exactly one structural fault,
//! and estimates how often random input sequences tell a mutant apart from
//! the reference. That fraction is the fault-detection ratio.
//!
//! # Core Concepts
//!
//! - **Machine**: an immutable, validated, deterministic Mealy machine
//! - **Simulator**: replays input sequences and records `(state, output)` steps
//! - **Mutation**: transition-target, output, or state-split fault injection
//! - **Oracle**: compares output sequences of reference and mutant
//! - **Harness**: repeats the oracle over many random sequences and machines
//!
//! # Example
//!
//! ```rust
//! use mealy_mutant::core::Machine;
//! use mealy_mutant::mutation::{mutate, MutationKind};
//! use mealy_mutant::oracle::estimate_detection_ratio;
//! use mealy_mutant::simulator::replay;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let reference = Machine::build(
//!     2,
//!     2,
//!     2,
//!     0,
//!     [(0, 0, 1, 0), (0, 1, 0, 1), (1, 0, 0, 1), (1, 1, 1, 0)],
//! )
//! .unwrap();
//!
//! let record = replay(&reference, &[0, 1]).unwrap();
//! assert_eq!(record.pairs(), vec![(1, 0), (1, 0)]);
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mutant = mutate(&reference, MutationKind::Output, &mut rng).unwrap();
//! let ratio = estimate_detection_ratio(&reference, &mutant.machine, 10, 100, &mut rng).unwrap();
//! assert!((0.0..=1.0).contains(&ratio));
//! ```

pub mod builder;
pub mod core;
pub mod description;
pub mod error;
pub mod mutation;
pub mod oracle;
pub mod render;
pub mod simulator;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{FormatError, Machine, Transition};
pub use crate::error::Error;
pub use mutation::{Mutant, Mutation, MutationKind, SplitPolicy};
pub use oracle::{detect, Harness, HarnessConfig};
pub use simulator::{replay, RunRecord, Simulator};
