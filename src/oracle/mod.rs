//! Conformance oracle and statistical harness.
//!
//! # Key Concepts
//!
//! - **Detection**: a sequence detects a mutant when the output sequences of
//!   reference and mutant differ at some position
//! - **Detection ratio**: fraction of random sequences that detect a mutant
//! - **Batch evaluation**: one mutant per reference machine, one ratio each
//!
//! The free functions take an injected random source and run sequentially.
//! [`Harness`] runs the same procedures across a worker pool with per-trial
//! seeding and cooperative cancellation.

mod cancel;
mod config;
mod detect;
mod error;
mod harness;
mod parallel;
mod report;

pub use cancel::CancellationToken;
pub use config::HarnessConfig;
pub use detect::{detect, first_divergence};
pub use error::{HarnessError, ReplayError, TrialError};
pub use harness::{batch_evaluate, estimate_detection_ratio, random_input_sequence};
pub use parallel::Harness;
pub use report::{BatchReport, Estimate, MachineOutcome};
