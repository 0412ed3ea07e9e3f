//! Format errors for machine descriptions and construction.

use thiserror::Error;

/// Errors raised when a machine description is malformed or violates a
/// machine invariant. A `FormatError` never yields a partially built machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Invalid description: line 0 must start with the 'F' marker")]
    MissingMarker,

    #[error("Line {line}: expected {expected}, found end of input")]
    MissingLine { line: usize, expected: &'static str },

    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: field {field} is not a valid integer: '{value}'")]
    InvalidInteger {
        line: usize,
        field: usize,
        value: String,
    },

    #[error("Declared {declared} transitions but found {found}")]
    TransitionCountMismatch { declared: usize, found: usize },

    #[error("Machine field '{0}' not specified")]
    MissingField(&'static str),

    #[error("Initial state {initial} out of range (machine has {num_states} states)")]
    InitialStateOutOfRange { initial: usize, num_states: usize },

    #[error("Transition {index}: state {state} out of range (machine has {num_states} states)")]
    StateOutOfRange {
        index: usize,
        state: usize,
        num_states: usize,
    },

    #[error("Transition {index}: input {input} out of range (alphabet has {num_inputs} symbols)")]
    InputOutOfRange {
        index: usize,
        input: usize,
        num_inputs: usize,
    },

    #[error("Transition {index}: output {output} out of range (alphabet has {num_outputs} symbols)")]
    OutputOutOfRange {
        index: usize,
        output: usize,
        num_outputs: usize,
    },

    #[error(
        "Transition {index}: duplicate definition for state {state} on input {input} \
         (already defined by transition {first})"
    )]
    DuplicateTransition {
        index: usize,
        first: usize,
        state: usize,
        input: usize,
    },
}
