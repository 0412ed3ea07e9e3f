//! Run records produced by replaying input sequences.

use crate::core::{OutputSymbol, StateId};
use serde::{Deserialize, Serialize};

/// Observation made by a single simulator step: the state reached and the
/// output emitted on the way there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    /// The state the machine moved to
    pub state: StateId,
    /// The output emitted by the transition
    pub output: OutputSymbol,
}

impl From<Step> for (StateId, OutputSymbol) {
    fn from(step: Step) -> Self {
        (step.state, step.output)
    }
}

/// Ordered record of the steps taken while replaying an input sequence.
///
/// Only used for comparing behavior; it is not persisted by the engine.
///
/// # Example
///
/// ```rust
/// use mealy_mutant::core::Machine;
/// use mealy_mutant::simulator::replay;
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
/// let record = replay(&machine, &[0, 1]).unwrap();
/// assert_eq!(record.pairs(), vec![(1, 0), (1, 0)]);
/// assert_eq!(record.outputs(), vec![0, 0]);
/// assert_eq!(record.path(), vec![0, 1, 1]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    initial: StateId,
    steps: Vec<Step>,
}

impl RunRecord {
    /// Create an empty record for a run starting in `initial`.
    pub fn new(initial: StateId) -> Self {
        Self {
            initial,
            steps: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// The state the run started in.
    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Steps as `(state, output)` pairs.
    pub fn pairs(&self) -> Vec<(StateId, OutputSymbol)> {
        self.steps.iter().copied().map(Into::into).collect()
    }

    /// The emitted output sequence.
    pub fn outputs(&self) -> Vec<OutputSymbol> {
        self.steps.iter().map(|s| s.output).collect()
    }

    /// States visited: the initial state followed by the target of each step.
    pub fn path(&self) -> Vec<StateId> {
        std::iter::once(self.initial)
            .chain(self.steps.iter().map(|s| s.state))
            .collect()
    }

    /// The state the run ended in.
    pub fn final_state(&self) -> StateId {
        self.steps.last().map_or(self.initial, |s| s.state)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
