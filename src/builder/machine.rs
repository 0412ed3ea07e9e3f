//! Builder for constructing Mealy machines.

use crate::core::{FormatError, InputSymbol, Machine, OutputSymbol, StateId, Transition};

/// Builder for constructing machines with a fluent API.
///
/// Every header field is required. Validation is deferred to
/// [`MachineBuilder::build`], which applies the same checks as
/// [`Machine::build`].
#[derive(Clone, Debug, Default)]
pub struct MachineBuilder {
    states: Option<usize>,
    inputs: Option<usize>,
    outputs: Option<usize>,
    initial: Option<StateId>,
    transitions: Vec<Transition>,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of states (required).
    pub fn states(mut self, count: usize) -> Self {
        self.states = Some(count);
        self
    }

    /// Set the size of the input alphabet (required).
    pub fn inputs(mut self, count: usize) -> Self {
        self.inputs = Some(count);
        self
    }

    /// Set the size of the output alphabet (required).
    pub fn outputs(mut self, count: usize) -> Self {
        self.outputs = Some(count);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: StateId) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition.
    pub fn transition(
        mut self,
        from: StateId,
        input: InputSymbol,
        to: StateId,
        output: OutputSymbol,
    ) -> Self {
        self.transitions
            .push(Transition::new(from, input, to, output));
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions<I, T>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Transition>,
    {
        self.transitions
            .extend(transitions.into_iter().map(Into::into));
        self
    }

    /// Build the machine.
    /// Returns an error if a header field is missing or an invariant fails.
    pub fn build(self) -> Result<Machine, FormatError> {
        let states = self.states.ok_or(FormatError::MissingField("states"))?;
        let inputs = self.inputs.ok_or(FormatError::MissingField("inputs"))?;
        let outputs = self.outputs.ok_or(FormatError::MissingField("outputs"))?;
        let initial = self.initial.ok_or(FormatError::MissingField("initial"))?;

        Machine::build(states, inputs, outputs, initial, self.transitions)
    }
}
