//! Deterministic simulation of Mealy machines.
//!
//! A [`Simulator`] is either freshly reset (current state is the initial
//! state) or mid-run. It holds the only mutable execution state in the crate
//! and borrows the machine it runs over.

mod error;
mod record;
mod runner;

pub use error::NoTransitionError;
pub use record::{RunRecord, Step};
pub use runner::{replay, Simulator};
