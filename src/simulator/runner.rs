//! Deterministic stepping over a machine.

use super::error::NoTransitionError;
use super::record::{RunRecord, Step};
use crate::core::{InputSymbol, Machine, StateId};

/// Executes a machine one input at a time.
///
/// The simulator borrows the machine and owns only the current state, so any
/// number of simulators may run over the same machine.
#[derive(Clone, Debug)]
pub struct Simulator<'m> {
    machine: &'m Machine,
    current: StateId,
    position: usize,
}

impl<'m> Simulator<'m> {
    /// Start a simulator in the machine's initial state.
    pub fn reset(machine: &'m Machine) -> Self {
        Self {
            machine,
            current: machine.initial_state(),
            position: 0,
        }
    }

    /// Return to the initial state, discarding the current run.
    pub fn restart(&mut self) {
        self.current = self.machine.initial_state();
        self.position = 0;
    }

    pub fn machine(&self) -> &'m Machine {
        self.machine
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Number of successful steps since the last reset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Consume one input symbol.
    ///
    /// On success the simulator moves to the transition's target and the
    /// step is returned. If no transition is defined the state is unchanged
    /// and [`NoTransitionError`] is returned.
    pub fn step(&mut self, input: InputSymbol) -> Result<Step, NoTransitionError> {
        let (to, output) =
            self.machine
                .transition_for(self.current, input)
                .ok_or(NoTransitionError {
                    state: self.current,
                    input,
                    position: self.position,
                })?;

        self.current = to;
        self.position += 1;
        Ok(Step { state: to, output })
    }

    /// Restart, then step through `inputs` in order, stopping at the first
    /// missing transition.
    pub fn replay(&mut self, inputs: &[InputSymbol]) -> Result<RunRecord, NoTransitionError> {
        self.restart();
        let mut record = RunRecord::new(self.current);
        for &input in inputs {
            record.push(self.step(input)?);
        }
        Ok(record)
    }
}

/// Replay `inputs` on `machine` from its initial state.
///
/// Every call starts fresh; earlier runs have no effect.
pub fn replay(machine: &Machine, inputs: &[InputSymbol]) -> Result<RunRecord, NoTransitionError> {
    Simulator::reset(machine).replay(inputs)
}
