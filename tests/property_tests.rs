//! Property-based tests for simulation, mutation and detection.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated complete machines.

use mealy_mutant::core::{InputSymbol, Machine};
use mealy_mutant::description::{parse_description, to_description};
use mealy_mutant::mutation::{mutate, mutate_with_policy, Mutation, MutationKind, SplitPolicy};
use mealy_mutant::oracle::{detect, estimate_detection_ratio, Harness, HarnessConfig};
use mealy_mutant::simulator::replay;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

prop_compose! {
    fn complete_machine()(
        num_states in 1..5usize,
        num_inputs in 1..4usize,
        num_outputs in 1..4usize,
    )(
        table in prop::collection::vec((0..num_states, 0..num_outputs), num_states * num_inputs),
        initial in 0..num_states,
        num_states in Just(num_states),
        num_inputs in Just(num_inputs),
        num_outputs in Just(num_outputs),
    ) -> Machine {
        let transitions = table
            .into_iter()
            .enumerate()
            .map(|(k, (to, output))| (k / num_inputs, k % num_inputs, to, output));
        Machine::build(num_states, num_inputs, num_outputs, initial, transitions).unwrap()
    }
}

fn machine_and_inputs() -> impl Strategy<Value = (Machine, Vec<InputSymbol>)> {
    complete_machine().prop_flat_map(|machine| {
        let num_inputs = machine.num_inputs();
        (Just(machine), prop::collection::vec(0..num_inputs, 0..24))
    })
}

fn arbitrary_policy() -> impl Strategy<Value = SplitPolicy> {
    prop_oneof![Just(SplitPolicy::FirstIncoming), Just(SplitPolicy::AllIncoming)]
}

/// Indices where the two transition lists differ, over their common prefix.
fn differing(a: &Machine, b: &Machine) -> Vec<usize> {
    a.transitions()
        .iter()
        .zip(b.transitions())
        .enumerate()
        .filter(|(_, (x, y))| x != y)
        .map(|(i, _)| i)
        .collect()
}

proptest! {
    #[test]
    fn empty_replay_stays_in_initial_state(machine in complete_machine()) {
        let record = replay(&machine, &[]).unwrap();
        prop_assert!(record.is_empty());
        prop_assert_eq!(record.final_state(), machine.initial_state());
    }

    #[test]
    fn replay_is_deterministic((machine, inputs) in machine_and_inputs()) {
        let first = replay(&machine, &inputs).unwrap();
        let second = replay(&machine, &inputs).unwrap();
        prop_assert_eq!(first.len(), inputs.len());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn replay_follows_transition_table((machine, inputs) in machine_and_inputs()) {
        let record = replay(&machine, &inputs).unwrap();
        let mut state = machine.initial_state();
        for (input, step) in inputs.iter().zip(record.steps()) {
            let (next, output) = machine.transition_for(state, *input).unwrap();
            prop_assert_eq!((step.state, step.output), (next, output));
            state = next;
        }
    }

    #[test]
    fn description_text_reproduces_machine(machine in complete_machine()) {
        let parsed = parse_description(&to_description(&machine)).unwrap();
        prop_assert_eq!(parsed, machine);
    }

    #[test]
    fn transition_target_mutant_changes_one_target(
        machine in complete_machine(),
        seed in any::<u64>(),
    ) {
        prop_assume!(machine.num_states() >= 2);
        let before = machine.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mutant = mutate(&machine, MutationKind::TransitionTarget, &mut rng).unwrap();

        prop_assert_eq!(&machine, &before);
        prop_assert_eq!(mutant.machine.num_states(), machine.num_states());
        prop_assert_eq!(mutant.machine.transition_count(), machine.transition_count());

        let changed = differing(&machine, &mutant.machine);
        prop_assert_eq!(changed.len(), 1);
        let (old, new) = (machine.transitions()[changed[0]], mutant.machine.transitions()[changed[0]]);
        prop_assert_ne!(old.to, new.to);
        prop_assert_eq!((old.from, old.input, old.output), (new.from, new.input, new.output));
    }

    #[test]
    fn output_mutant_changes_one_output(
        machine in complete_machine(),
        seed in any::<u64>(),
    ) {
        prop_assume!(machine.num_outputs() >= 2);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mutant = mutate(&machine, MutationKind::Output, &mut rng).unwrap();

        let changed = differing(&machine, &mutant.machine);
        prop_assert_eq!(changed.len(), 1);
        let (old, new) = (machine.transitions()[changed[0]], mutant.machine.transitions()[changed[0]]);
        prop_assert_ne!(old.output, new.output);
        prop_assert_eq!((old.from, old.input, old.to), (new.from, new.input, new.to));
    }

    #[test]
    fn state_split_adds_reachable_copy(
        machine in complete_machine(),
        seed in any::<u64>(),
        policy in arbitrary_policy(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mutant = mutate_with_policy(&machine, MutationKind::StateSplit, policy, &mut rng).unwrap();
        let Mutation::StateSplit { state, .. } = mutant.mutation else {
            panic!("expected a state split, got {:?}", mutant.mutation);
        };

        let split = machine.num_states();
        prop_assert_eq!(mutant.machine.num_states(), split + 1);
        prop_assert_eq!(
            mutant.machine.transition_count(),
            machine.transition_count() + machine.out_degree(state)
        );
        prop_assert!(!mutant.machine.incoming(split).is_empty());
        prop_assert!(mutant.machine.is_complete());

        for input in 0..machine.num_inputs() {
            let (to, output) = machine.transition_for(state, input).unwrap();
            let (copy_to, copy_output) = mutant.machine.transition_for(split, input).unwrap();
            prop_assert_eq!(copy_output, output);
            prop_assert!(copy_to == to || (copy_to == split && to == state));
        }
    }

    #[test]
    fn first_incoming_split_redirects_one_edge(
        machine in complete_machine(),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mutant = mutate(&machine, MutationKind::StateSplit, &mut rng).unwrap();

        let redirected = differing(&machine, &mutant.machine);
        prop_assert_eq!(redirected.len(), 1);
        prop_assert_eq!(mutant.machine.transitions()[redirected[0]].to, machine.num_states());
    }

    #[test]
    fn state_split_preserves_output_behavior(
        (machine, inputs) in machine_and_inputs(),
        seed in any::<u64>(),
        policy in arbitrary_policy(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mutant = mutate_with_policy(&machine, MutationKind::StateSplit, policy, &mut rng).unwrap();
        prop_assert!(!detect(&machine, &mutant.machine, &inputs).unwrap());
    }

    #[test]
    fn machine_never_detects_itself((machine, inputs) in machine_and_inputs()) {
        prop_assert!(!detect(&machine, &machine, &inputs).unwrap());
    }

    #[test]
    fn ratio_is_a_fraction(
        machine in complete_machine(),
        seed in any::<u64>(),
        length in 0..12usize,
        trials in 0..40usize,
    ) {
        prop_assume!(machine.num_outputs() >= 2);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mutant = mutate(&machine, MutationKind::Output, &mut rng).unwrap();
        let ratio = estimate_detection_ratio(&machine, &mutant.machine, length, trials, &mut rng).unwrap();

        prop_assert!((0.0..=1.0).contains(&ratio));
        if length == 0 || trials == 0 {
            prop_assert_eq!(ratio, 0.0);
        }
    }

    #[test]
    fn harness_ignores_worker_count(
        machine in complete_machine(),
        seed in any::<u64>(),
        workers in 2..6usize,
    ) {
        prop_assume!(machine.num_outputs() >= 2);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mutant = mutate(&machine, MutationKind::Output, &mut rng).unwrap();

        let config = HarnessConfig {
            sequence_length: 6,
            trial_count: 64,
            seed,
            workers: 1,
            split_policy: SplitPolicy::default(),
        };
        let sequential = Harness::new(config.clone()).estimate(&machine, &mutant.machine).unwrap();
        let parallel = Harness::new(HarnessConfig { workers, ..config })
            .estimate(&machine, &mutant.machine)
            .unwrap();

        prop_assert_eq!(sequential, parallel);
    }
}
