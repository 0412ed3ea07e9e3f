//! Mutation operators.
//!
//! Every operator works in two phases: a random draw picks a concrete
//! [`Mutation`], then [`Mutation::apply`] builds the mutant deterministically
//! from a fresh copy of the source transitions. The source machine is never
//! modified.

use super::error::{DegenerateMutationError, MutationError};
use super::kind::{MutationKind, SplitPolicy};
use crate::core::{Machine, OutputSymbol, StateId, Transition};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A concrete single-fault perturbation of a machine.
///
/// # Example
///
/// ```rust
/// use mealy_mutant::core::Machine;
/// use mealy_mutant::mutation::Mutation;
///
/// let reference = Machine::build(
///     2,
///     2,
///     2,
///     0,
///     [(0, 0, 1, 0), (0, 1, 0, 1), (1, 0, 0, 1), (1, 1, 1, 0)],
/// )
/// .unwrap();
///
/// let mutant = Mutation::Output { index: 0, new_output: 1 }
///     .apply(&reference)
///     .unwrap();
///
/// assert_eq!(mutant.transition_for(0, 0), Some((1, 1)));
/// assert_eq!(reference.transition_for(0, 0), Some((1, 0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mutation {
    /// Redirect transition `index` to `new_target`.
    TransitionTarget { index: usize, new_target: StateId },
    /// Replace the output of transition `index` with `new_output`.
    Output {
        index: usize,
        new_output: OutputSymbol,
    },
    /// Split `state` into itself and a fresh copy.
    StateSplit { state: StateId, policy: SplitPolicy },
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Self::TransitionTarget { .. } => MutationKind::TransitionTarget,
            Self::Output { .. } => MutationKind::Output,
            Self::StateSplit { .. } => MutationKind::StateSplit,
        }
    }

    /// Draw a random mutation of `kind` for `source`.
    ///
    /// Transitions are chosen uniformly; replacement targets and outputs are
    /// resampled until they differ from the original.
    ///
    /// A state split draws uniformly from the states that have at least one
    /// incoming transition, not from all states, so the new state is always
    /// reachable. States without incoming edges are never split, and a
    /// machine where no state qualifies yields
    /// [`DegenerateMutationError::NoIncomingTransitions`].
    pub fn random<R: Rng + ?Sized>(
        source: &Machine,
        kind: MutationKind,
        policy: SplitPolicy,
        rng: &mut R,
    ) -> Result<Self, DegenerateMutationError> {
        match kind {
            MutationKind::TransitionTarget => {
                if source.num_states() < 2 {
                    return Err(DegenerateMutationError::SingleState {
                        num_states: source.num_states(),
                    });
                }
                let (index, original) = pick_transition(source, kind, rng)?;
                let new_target = resample_excluding(rng, source.num_states(), original.to);
                Ok(Self::TransitionTarget { index, new_target })
            }
            MutationKind::Output => {
                if source.num_outputs() < 2 {
                    return Err(DegenerateMutationError::SingleOutput {
                        num_outputs: source.num_outputs(),
                    });
                }
                let (index, original) = pick_transition(source, kind, rng)?;
                let new_output = resample_excluding(rng, source.num_outputs(), original.output);
                Ok(Self::Output { index, new_output })
            }
            MutationKind::StateSplit => {
                let mut candidates: Vec<StateId> =
                    source.transitions().iter().map(|t| t.to).collect();
                candidates.sort_unstable();
                candidates.dedup();
                if candidates.is_empty() {
                    return Err(DegenerateMutationError::NoIncomingTransitions);
                }
                let state = candidates[rng.gen_range(0..candidates.len())];
                Ok(Self::StateSplit { state, policy })
            }
        }
    }

    /// Build the mutant described by this mutation.
    pub fn apply(&self, source: &Machine) -> Result<Machine, MutationError> {
        let mut transitions = source.transitions().to_vec();

        match *self {
            Self::TransitionTarget { index, new_target } => {
                let t = transition_mut(&mut transitions, index)?;
                check_range("target state", new_target, source.num_states())?;
                if t.to == new_target {
                    return Err(MutationError::Unchanged { index });
                }
                t.to = new_target;
                Ok(source.with_transitions(source.num_states(), transitions)?)
            }
            Self::Output { index, new_output } => {
                let t = transition_mut(&mut transitions, index)?;
                check_range("output symbol", new_output, source.num_outputs())?;
                if t.output == new_output {
                    return Err(MutationError::Unchanged { index });
                }
                t.output = new_output;
                Ok(source.with_transitions(source.num_states(), transitions)?)
            }
            Self::StateSplit { state, policy } => {
                check_range("state", state, source.num_states())?;
                let incoming = source.incoming(state);
                let Some(&first_incoming) = incoming.first() else {
                    return Err(DegenerateMutationError::Unreachable { state }.into());
                };

                let split = source.num_states();
                let num_states = split
                    .checked_add(1)
                    .ok_or(MutationError::StateCountOverflow { num_states: split })?;
                transitions.extend(
                    source
                        .transitions()
                        .iter()
                        .filter(|t| t.from == state)
                        .map(|t| Transition { from: split, ..*t }),
                );

                match policy {
                    SplitPolicy::FirstIncoming => transitions[first_incoming].to = split,
                    SplitPolicy::AllIncoming => transitions
                        .iter_mut()
                        .filter(|t| t.to == state)
                        .for_each(|t| t.to = split),
                }

                Ok(source.with_transitions(num_states, transitions)?)
            }
        }
    }
}

/// A mutant machine together with the fault that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutant {
    pub machine: Machine,
    pub mutation: Mutation,
}

impl Mutant {
    /// Apply `mutation` to `source`.
    pub fn derive(source: &Machine, mutation: Mutation) -> Result<Self, MutationError> {
        let machine = mutation.apply(source)?;
        Ok(Self { machine, mutation })
    }
}

/// Derive a random mutant of `kind` using the default split policy.
pub fn mutate<R: Rng + ?Sized>(
    source: &Machine,
    kind: MutationKind,
    rng: &mut R,
) -> Result<Mutant, MutationError> {
    mutate_with_policy(source, kind, SplitPolicy::default(), rng)
}

/// Derive a random mutant of `kind`.
pub fn mutate_with_policy<R: Rng + ?Sized>(
    source: &Machine,
    kind: MutationKind,
    policy: SplitPolicy,
    rng: &mut R,
) -> Result<Mutant, MutationError> {
    let mutation = Mutation::random(source, kind, policy, rng)?;
    debug!("Derived {} mutant: {:?}", kind, mutation);
    Mutant::derive(source, mutation)
}

fn pick_transition<R: Rng + ?Sized>(
    source: &Machine,
    kind: MutationKind,
    rng: &mut R,
) -> Result<(usize, Transition), DegenerateMutationError> {
    let count = source.transition_count();
    if count == 0 {
        return Err(DegenerateMutationError::NoTransitions { kind });
    }
    let index = rng.gen_range(0..count);
    Ok((index, source.transitions()[index]))
}

/// Uniform draw from `[0, bound)` other than `excluded`. Requires `bound >= 2`.
fn resample_excluding<R: Rng + ?Sized>(rng: &mut R, bound: usize, excluded: usize) -> usize {
    loop {
        let candidate = rng.gen_range(0..bound);
        if candidate != excluded {
            return candidate;
        }
    }
}

fn transition_mut(
    transitions: &mut [Transition],
    index: usize,
) -> Result<&mut Transition, MutationError> {
    let count = transitions.len();
    transitions
        .get_mut(index)
        .ok_or(MutationError::TransitionOutOfRange { index, count })
}

fn check_range(what: &'static str, value: usize, limit: usize) -> Result<(), MutationError> {
    if value < limit {
        Ok(())
    } else {
        Err(MutationError::ValueOutOfRange { what, value, limit })
    }
}
