//! Single-sequence conformance checks.

use super::error::ReplayError;
use crate::core::{InputSymbol, Machine};
use crate::simulator::replay;

/// Index of the first position where the output sequences of `reference`
/// and `mutant` differ on `inputs`, or `None` if they agree throughout.
///
/// Only outputs are compared. State ids of a mutant need not correspond to
/// the reference's (a state split introduces new ones).
pub fn first_divergence(
    reference: &Machine,
    mutant: &Machine,
    inputs: &[InputSymbol],
) -> Result<Option<usize>, ReplayError> {
    let expected = replay(reference, inputs).map_err(ReplayError::Reference)?;
    let observed = replay(mutant, inputs).map_err(ReplayError::Mutant)?;

    Ok(expected
        .steps()
        .iter()
        .zip(observed.steps())
        .position(|(e, o)| e.output != o.output))
}

/// Whether `inputs` exposes a difference between `reference` and `mutant`.
///
/// # Example
///
/// ```rust
/// use mealy_mutant::core::Machine;
/// use mealy_mutant::mutation::Mutation;
/// use mealy_mutant::oracle::detect;
///
/// let reference = Machine::build(
///     2,
///     2,
///     2,
///     0,
///     [(0, 0, 1, 0), (0, 1, 0, 1), (1, 0, 0, 1), (1, 1, 1, 0)],
/// )
/// .unwrap();
/// let mutant = Mutation::Output { index: 0, new_output: 1 }
///     .apply(&reference)
///     .unwrap();
///
/// assert!(detect(&reference, &mutant, &[0]).unwrap());
/// assert!(!detect(&reference, &mutant, &[1]).unwrap());
/// ```
pub fn detect(
    reference: &Machine,
    mutant: &Machine,
    inputs: &[InputSymbol],
) -> Result<bool, ReplayError> {
    Ok(first_divergence(reference, mutant, inputs)?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{Mutation, SplitPolicy};
    use crate::simulator::NoTransitionError;

    fn toggle_machine() -> Machine {
        Machine::build(
            2,
            2,
            2,
            0,
            [(0, 0, 1, 0), (0, 1, 0, 1), (1, 0, 0, 1), (1, 1, 1, 0)],
        )
        .unwrap()
    }

    #[test]
    fn identical_machines_never_diverge() {
        let machine = toggle_machine();
        assert!(!detect(&machine, &machine.clone(), &[0, 1, 1, 0, 0]).unwrap());
        assert!(!detect(&machine, &machine, &[]).unwrap());
    }

    #[test]
    fn output_mutation_detected_only_when_exercised() {
        let reference = toggle_machine();
        let mutant = Mutation::Output {
            index: 0,
            new_output: 1,
        }
        .apply(&reference)
        .unwrap();

        assert!(detect(&reference, &mutant, &[0]).unwrap());
        assert!(!detect(&reference, &mutant, &[1]).unwrap());
        assert_eq!(
            first_divergence(&reference, &mutant, &[1, 1, 0]).unwrap(),
            Some(2)
        );
    }

    #[test]
    fn state_split_alone_is_not_a_divergence() {
        // Splitting a state of a machine copies its behavior, so renamed
        // state ids must not count as a difference.
        let reference = toggle_machine();
        let mutant = Mutation::StateSplit {
            state: 1,
            policy: SplitPolicy::FirstIncoming,
        }
        .apply(&reference)
        .unwrap();

        let inputs = [0, 1, 0, 0, 1, 1, 0];
        let expected = replay(&reference, &inputs).unwrap();
        let observed = replay(&mutant, &inputs).unwrap();
        assert_ne!(expected.path(), observed.path());
        assert!(!detect(&reference, &mutant, &inputs).unwrap());
    }

    #[test]
    fn replay_failures_name_the_side() {
        let reference = toggle_machine();
        let partial = Machine::build(2, 2, 2, 0, [(0, 0, 1, 0)]).unwrap();

        assert_eq!(
            detect(&reference, &partial, &[0, 0]),
            Err(ReplayError::Mutant(NoTransitionError {
                state: 1,
                input: 0,
                position: 1
            }))
        );
        assert!(matches!(
            detect(&partial, &reference, &[1]),
            Err(ReplayError::Reference(_))
        ));
    }
}
