//! Core machine model.
//!
//! This module contains the immutable data model everything else builds on:
//! - State and symbol identifiers
//! - Transitions of the behavior function
//! - The validated, indexed [`Machine`]
//!
//! Nothing in this module has side effects. A machine is validated once at
//! construction and never changes afterwards.

mod error;
mod machine;
mod transition;

pub use error::FormatError;
pub use machine::Machine;
pub use transition::{InputSymbol, OutputSymbol, StateId, Transition};
