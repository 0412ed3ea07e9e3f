//! Sequential statistical procedures over an injected random source.

use super::detect::detect;
use super::error::{HarnessError, ReplayError, TrialError};
use super::report::{Estimate, MachineOutcome};
use crate::core::{InputSymbol, Machine};
use crate::mutation::{mutate, MutationError, MutationKind};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Draw `length` input symbols uniformly and independently from the input
/// alphabet of `machine`.
///
/// Fails only when symbols are requested from an empty alphabet.
pub fn random_input_sequence<R: Rng + ?Sized>(
    machine: &Machine,
    length: usize,
    rng: &mut R,
) -> Result<Vec<InputSymbol>, HarnessError> {
    check_alphabet(machine, length)?;
    Ok(sample_inputs(machine.num_inputs(), length, rng))
}

/// Fraction of `trials` random sequences of `length` that distinguish
/// `mutant` from `reference`.
///
/// Returns `0.0` when `trials` or `length` is zero. A trial whose replay
/// fails stops the estimate and is reported by index.
///
/// # Example
///
/// ```rust
/// use mealy_mutant::core::Machine;
/// use mealy_mutant::mutation::Mutation;
/// use mealy_mutant::oracle::estimate_detection_ratio;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
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
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let ratio = estimate_detection_ratio(&reference, &mutant, 8, 200, &mut rng).unwrap();
/// assert!(ratio > 0.0 && ratio <= 1.0);
/// ```
pub fn estimate_detection_ratio<R: Rng + ?Sized>(
    reference: &Machine,
    mutant: &Machine,
    sequence_length: usize,
    trial_count: usize,
    rng: &mut R,
) -> Result<f64, HarnessError> {
    Ok(estimate(reference, mutant, sequence_length, trial_count, rng)?.ratio())
}

/// Derive one mutant of `kind` per reference machine and estimate its
/// detection ratio.
///
/// Machines too small for the mutation are reported as
/// [`MachineOutcome::Excluded`] and failing trials as
/// [`MachineOutcome::Failed`]; neither stops the batch.
pub fn batch_evaluate<R: Rng + ?Sized>(
    references: &BTreeMap<String, Machine>,
    kind: MutationKind,
    sequence_length: usize,
    trial_count: usize,
    rng: &mut R,
) -> BTreeMap<String, MachineOutcome> {
    let mut outcomes = BTreeMap::new();

    for (id, reference) in references {
        let outcome = match mutate(reference, kind, rng) {
            Ok(mutant) => {
                match estimate(reference, &mutant.machine, sequence_length, trial_count, rng) {
                    Ok(estimate) => MachineOutcome::Evaluated {
                        mutation: mutant.mutation,
                        estimate,
                    },
                    Err(err) => failed(id, err),
                }
            }
            Err(err) => excluded(id, err),
        };
        outcomes.insert(id.clone(), outcome);
    }

    outcomes
}

fn estimate<R: Rng + ?Sized>(
    reference: &Machine,
    mutant: &Machine,
    sequence_length: usize,
    trial_count: usize,
    rng: &mut R,
) -> Result<Estimate, HarnessError> {
    check_alphabet(reference, sequence_length)?;

    let mut detected = 0;
    for trial in 0..trial_count {
        if run_trial(reference, mutant, sequence_length, rng)
            .map_err(|source| TrialError { trial, source })?
        {
            detected += 1;
        }
    }

    debug!(
        "Detected mutant in {}/{} trials of length {}",
        detected, trial_count, sequence_length
    );
    Ok(Estimate {
        detected,
        completed: trial_count,
        requested: trial_count,
        cancelled: false,
    })
}

/// Run one trial on a fresh random sequence. The alphabet must already be
/// known to be non-empty when `sequence_length > 0`.
pub(crate) fn run_trial<R: Rng + ?Sized>(
    reference: &Machine,
    mutant: &Machine,
    sequence_length: usize,
    rng: &mut R,
) -> Result<bool, ReplayError> {
    let inputs = sample_inputs(reference.num_inputs(), sequence_length, rng);
    detect(reference, mutant, &inputs)
}

pub(crate) fn check_alphabet(machine: &Machine, length: usize) -> Result<(), HarnessError> {
    if length > 0 && machine.num_inputs() == 0 {
        return Err(HarnessError::EmptyInputAlphabet { length });
    }
    Ok(())
}

fn sample_inputs<R: Rng + ?Sized>(
    num_inputs: usize,
    length: usize,
    rng: &mut R,
) -> Vec<InputSymbol> {
    (0..length).map(|_| rng.gen_range(0..num_inputs)).collect()
}

pub(crate) fn excluded(id: &str, err: MutationError) -> MachineOutcome {
    warn!("Excluding machine '{}': {}", id, err);
    MachineOutcome::Excluded {
        reason: err.to_string(),
    }
}

pub(crate) fn failed(id: &str, err: HarnessError) -> MachineOutcome {
    warn!("Evaluation of machine '{}' failed: {}", id, err);
    let trial = match &err {
        HarnessError::Trial(trial_err) => Some(trial_err.trial),
        _ => None,
    };
    MachineOutcome::Failed {
        trial,
        error: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::Mutation;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

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
    fn random_sequence_stays_in_alphabet() {
        let machine = Machine::build(1, 5, 1, 0, [(0, 0, 0, 0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let inputs = random_input_sequence(&machine, 200, &mut rng).unwrap();
        assert_eq!(inputs.len(), 200);
        assert!(inputs.iter().all(|&i| i < 5));
    }

    #[test]
    fn random_sequence_from_empty_alphabet() {
        let machine = Machine::build(1, 0, 1, 0, Vec::<(usize, usize, usize, usize)>::new())
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(random_input_sequence(&machine, 0, &mut rng), Ok(vec![]));
        assert_eq!(
            random_input_sequence(&machine, 3, &mut rng),
            Err(HarnessError::EmptyInputAlphabet { length: 3 })
        );
    }

    #[test]
    fn zero_length_sequences_never_detect() {
        let reference = toggle_machine();
        let mutant = Mutation::Output {
            index: 0,
            new_output: 1,
        }
        .apply(&reference)
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(
            estimate_detection_ratio(&reference, &mutant, 0, 50, &mut rng),
            Ok(0.0)
        );
    }

    #[test]
    fn zero_trials_give_zero_ratio() {
        let reference = toggle_machine();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(
            estimate_detection_ratio(&reference, &reference, 10, 0, &mut rng),
            Ok(0.0)
        );
    }

    #[test]
    fn equivalent_mutant_is_never_detected() {
        let reference = toggle_machine();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(
            estimate_detection_ratio(&reference, &reference.clone(), 10, 100, &mut rng),
            Ok(0.0)
        );
    }

    #[test]
    fn first_symbol_fault_is_detected_often() {
        // Output of (0, 0) changed: any sequence starting with 0 detects it.
        let reference = toggle_machine();
        let mutant = Mutation::Output {
            index: 0,
            new_output: 1,
        }
        .apply(&reference)
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let ratio = estimate_detection_ratio(&reference, &mutant, 6, 400, &mut rng).unwrap();
        assert!(ratio >= 0.5, "ratio {ratio}");
        assert!(ratio <= 1.0);
    }

    #[test]
    fn failing_trial_is_reported_by_index() {
        let reference = Machine::build(2, 2, 2, 0, [(0, 0, 1, 0), (1, 0, 0, 1)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = estimate_detection_ratio(&reference, &reference, 20, 10, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Trial(TrialError {
                source: ReplayError::Reference(_),
                ..
            })
        ));
    }

    #[test]
    fn batch_excludes_degenerate_machines() {
        let mut references = BTreeMap::new();
        references.insert("toggle".to_string(), toggle_machine());
        references.insert(
            "mono".to_string(),
            Machine::build(2, 1, 1, 0, [(0, 0, 1, 0), (1, 0, 0, 0)]).unwrap(),
        );
        references.insert(
            "partial".to_string(),
            Machine::build(2, 2, 2, 0, [(0, 0, 1, 0), (1, 0, 0, 1)]).unwrap(),
        );

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let outcomes = batch_evaluate(&references, MutationKind::Output, 8, 50, &mut rng);

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes["mono"], MachineOutcome::Excluded { .. }));
        assert!(matches!(
            outcomes["partial"],
            MachineOutcome::Failed { trial: Some(_), .. }
        ));
        let ratio = outcomes["toggle"].ratio().unwrap();
        assert!((0.0..=1.0).contains(&ratio));
    }
}
