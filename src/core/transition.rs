//! Transition records of a Mealy machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a state, in `[0, num_states)`.
pub type StateId = usize;

/// Identifier of an input symbol, in `[0, num_inputs)`.
pub type InputSymbol = usize;

/// Identifier of an output symbol, in `[0, num_outputs)`.
pub type OutputSymbol = usize;

/// A single edge of the behavior function: reading `input` in state `from`
/// moves the machine to `to` and emits `output`.
///
/// # Example
///
/// ```rust
/// use mealy_mutant::core::Transition;
///
/// let t = Transition::new(0, 1, 2, 0);
/// assert_eq!(t.key(), (0, 1));
/// assert_eq!(Transition::from((0, 1, 2, 0)), t);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// Source state
    pub from: StateId,
    /// Input symbol consumed
    pub input: InputSymbol,
    /// Target state
    pub to: StateId,
    /// Output symbol emitted
    pub output: OutputSymbol,
}

impl Transition {
    /// Create a transition from its four components.
    pub fn new(from: StateId, input: InputSymbol, to: StateId, output: OutputSymbol) -> Self {
        Self {
            from,
            input,
            to,
            output,
        }
    }

    /// The `(state, input)` pair this transition is defined for.
    pub fn key(&self) -> (StateId, InputSymbol) {
        (self.from, self.input)
    }
}

impl From<(StateId, InputSymbol, StateId, OutputSymbol)> for Transition {
    fn from((from, input, to, output): (StateId, InputSymbol, StateId, OutputSymbol)) -> Self {
        Self::new(from, input, to, output)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --{}/{}--> {}",
            self.from, self.input, self.output, self.to
        )
    }
}
