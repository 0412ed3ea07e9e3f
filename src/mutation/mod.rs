//! Fault injection for Mealy machines.
//!
//! A mutant differs from its source by exactly one structural fault:
//!
//! - **Transition target**: one transition goes to a different state
//! - **Output**: one transition emits a different symbol
//! - **State split**: a new state copies an existing state's outgoing
//!   behavior and takes over one (or, by policy, all) of its incoming edges
//!
//! Mutants are fresh values that own their transitions; nothing here mutates
//! a machine in place. Randomness is always injected by the caller.

mod error;
mod kind;
mod operators;

pub use error::{
    DegenerateMutationError, InvalidMutationKindError, InvalidSplitPolicyError, MutationError,
};
pub use kind::{MutationKind, SplitPolicy};
pub use operators::{mutate, mutate_with_policy, Mutant, Mutation};
