//! The deterministic Mealy machine value.
//!
//! A [`Machine`] is built once from validated parts and is immutable
//! afterwards. Lookup goes through an index keyed by `(state, input)` that is
//! built at construction, so every pair has at most one answer.

use super::error::FormatError;
use super::transition::{InputSymbol, OutputSymbol, StateId, Transition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

/// A deterministic, possibly partial, finite Mealy machine.
///
/// Transitions keep their declaration order. Operations that pick "a random
/// transition" or "the first matching transition" are defined over that
/// order.
///
/// # Example
///
/// ```rust
/// use mealy_mutant::core::Machine;
///
/// let machine = Machine::build(
///     2,
///     2,
///     2,
///     0,
///     [(0, 0, 1, 0), (0, 1, 0, 1), (1, 0, 0, 1), (1, 1, 1, 0)],
/// )
/// .unwrap();
///
/// assert_eq!(machine.num_states(), 2);
/// assert_eq!(machine.transition_for(0, 0), Some((1, 0)));
/// assert!(machine.is_complete());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "MachineParts", into = "MachineParts")]
pub struct Machine {
    num_states: usize,
    num_inputs: usize,
    num_outputs: usize,
    initial_state: StateId,
    transitions: Vec<Transition>,
    index: HashMap<(StateId, InputSymbol), usize>,
}

/// Serialized form of a machine; deserialization revalidates it.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct MachineParts {
    num_states: usize,
    num_inputs: usize,
    num_outputs: usize,
    initial_state: StateId,
    transitions: Vec<Transition>,
}

impl TryFrom<MachineParts> for Machine {
    type Error = FormatError;

    fn try_from(parts: MachineParts) -> Result<Self, Self::Error> {
        Machine::build(
            parts.num_states,
            parts.num_inputs,
            parts.num_outputs,
            parts.initial_state,
            parts.transitions,
        )
    }
}

impl From<Machine> for MachineParts {
    fn from(machine: Machine) -> Self {
        Self {
            num_states: machine.num_states,
            num_inputs: machine.num_inputs,
            num_outputs: machine.num_outputs,
            initial_state: machine.initial_state,
            transitions: machine.transitions,
        }
    }
}

impl Machine {
    /// Build a machine, checking every structural invariant.
    ///
    /// Fails with [`FormatError`] if the initial state or any transition
    /// component is out of range, or if two transitions share the same
    /// `(from, input)` key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mealy_mutant::core::{FormatError, Machine};
    ///
    /// let duplicate = Machine::build(1, 1, 1, 0, [(0, 0, 0, 0), (0, 0, 0, 0)]);
    /// assert!(matches!(
    ///     duplicate,
    ///     Err(FormatError::DuplicateTransition { index: 1, first: 0, .. })
    /// ));
    /// ```
    pub fn build<I, T>(
        num_states: usize,
        num_inputs: usize,
        num_outputs: usize,
        initial_state: StateId,
        transitions: I,
    ) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Transition>,
    {
        if initial_state >= num_states {
            return Err(FormatError::InitialStateOutOfRange {
                initial: initial_state,
                num_states,
            });
        }

        let transitions: Vec<Transition> = transitions.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(transitions.len());

        for (i, t) in transitions.iter().enumerate() {
            for state in [t.from, t.to] {
                if state >= num_states {
                    return Err(FormatError::StateOutOfRange {
                        index: i,
                        state,
                        num_states,
                    });
                }
            }
            if t.input >= num_inputs {
                return Err(FormatError::InputOutOfRange {
                    index: i,
                    input: t.input,
                    num_inputs,
                });
            }
            if t.output >= num_outputs {
                return Err(FormatError::OutputOutOfRange {
                    index: i,
                    output: t.output,
                    num_outputs,
                });
            }
            if let Some(&first) = index.get(&t.key()) {
                return Err(FormatError::DuplicateTransition {
                    index: i,
                    first,
                    state: t.from,
                    input: t.input,
                });
            }
            index.insert(t.key(), i);
        }

        Ok(Self {
            num_states,
            num_inputs,
            num_outputs,
            initial_state,
            transitions,
            index,
        })
    }

    /// Rebuild a machine with the same alphabets and initial state but a new
    /// state count and transition set.
    pub(crate) fn with_transitions(
        &self,
        num_states: usize,
        transitions: Vec<Transition>,
    ) -> Result<Self, FormatError> {
        Self::build(
            num_states,
            self.num_inputs,
            self.num_outputs,
            self.initial_state,
            transitions,
        )
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    pub fn initial_state(&self) -> StateId {
        self.initial_state
    }

    /// All state ids, `0..num_states`.
    pub fn states(&self) -> Range<StateId> {
        0..self.num_states
    }

    /// Transitions in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Look up the target state and output for `(state, input)`.
    ///
    /// Returns `None` when the machine defines no transition for the pair,
    /// including when either id is outside its range.
    pub fn transition_for(
        &self,
        state: StateId,
        input: InputSymbol,
    ) -> Option<(StateId, OutputSymbol)> {
        self.index.get(&(state, input)).map(|&i| {
            let t = &self.transitions[i];
            (t.to, t.output)
        })
    }

    /// Number of transitions leaving `state`.
    pub fn out_degree(&self, state: StateId) -> usize {
        self.transitions.iter().filter(|t| t.from == state).count()
    }

    /// Indices of transitions whose target is `state`, in declaration order.
    pub fn incoming(&self, state: StateId) -> Vec<usize> {
        self.transitions
            .iter()
            .enumerate()
            .filter(|(_, t)| t.to == state)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether every `(state, input)` pair has a transition.
    ///
    /// A machine whose pair count does not fit in `usize` cannot hold enough
    /// transitions and is never complete.
    pub fn is_complete(&self) -> bool {
        self.num_states.checked_mul(self.num_inputs) == Some(self.index.len())
    }

    /// Every `(state, input)` pair without a transition, in state-major order.
    ///
    /// The iterator is lazy; on very large sparse machines take only what
    /// you need.
    pub fn missing_transitions(&self) -> impl Iterator<Item = (StateId, InputSymbol)> + '_ {
        let num_inputs = self.num_inputs;
        self.states()
            .flat_map(move |s| (0..num_inputs).map(move |i| (s, i)))
            .filter(move |key| !self.index.contains_key(key))
    }
}

impl PartialEq for Machine {
    fn eq(&self, other: &Self) -> bool {
        // The index is derived from the transitions.
        self.num_states == other.num_states
            && self.num_inputs == other.num_inputs
            && self.num_outputs == other.num_outputs
            && self.initial_state == other.initial_state
            && self.transitions == other.transitions
    }
}

impl Eq for Machine {}
