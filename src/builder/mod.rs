//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder and the [`mealy_machine!`](crate::mealy_machine)
//! macro for declaring machines with minimal boilerplate. Both run the same
//! validation as [`Machine::build`](crate::core::Machine::build).

pub mod machine;
pub mod macros;

pub use machine::MachineBuilder;
