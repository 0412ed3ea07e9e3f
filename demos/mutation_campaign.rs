//! Mutation Campaign
//!
//! This example runs a small mutation campaign over a handful of machines.
//!
//! Key concepts:
//! - Declaring machines with the `mealy_machine!` macro
//! - Deriving one mutant of each kind and finding a distinguishing sequence
//! - Batch evaluation with a parallel, reproducible harness
//! - Degenerate machines are excluded rather than failing the batch
//!
//! Run with: cargo run --example mutation_campaign

use mealy_mutant::mealy_machine;
use mealy_mutant::mutation::{mutate, MutationKind};
use mealy_mutant::oracle::{first_divergence, random_input_sequence, Harness, HarnessConfig};
use mealy_mutant::Machine;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

fn toggle() -> Machine {
    mealy_machine! {
        states: 2,
        inputs: 2,
        outputs: 2,
        initial: 0,
        transitions: [
            (0, 0) -> (1, 0),
            (0, 1) -> (0, 1),
            (1, 0) -> (0, 1),
            (1, 1) -> (1, 0),
        ]
    }
    .expect("toggle machine is valid")
}

// Counts input 1 modulo 3 and reports when the counter wraps.
fn modulo_counter() -> Machine {
    mealy_machine! {
        states: 3,
        inputs: 2,
        outputs: 2,
        initial: 0,
        transitions: [
            (0, 0) -> (0, 0),
            (0, 1) -> (1, 0),
            (1, 0) -> (1, 0),
            (1, 1) -> (2, 0),
            (2, 0) -> (2, 0),
            (2, 1) -> (0, 1),
        ]
    }
    .expect("counter machine is valid")
}

// A single state: no transition-target mutant exists.
fn echo() -> Machine {
    mealy_machine! {
        states: 1,
        inputs: 2,
        outputs: 2,
        initial: 0,
        transitions: [
            (0, 0) -> (0, 0),
            (0, 1) -> (0, 1),
        ]
    }
    .expect("echo machine is valid")
}

fn main() {
    println!("=== Mutation Campaign ===\n");

    let counter = modulo_counter();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    println!("Single mutants of the modulo counter:");
    for kind in MutationKind::ALL {
        let mutant = mutate(&counter, kind, &mut rng).expect("counter admits every mutation");
        println!("  {kind}: {:?}", mutant.mutation);

        // Search a few random sequences for one that exposes the fault.
        let witness = (0..50).find_map(|_| {
            let inputs = random_input_sequence(&counter, 8, &mut rng).ok()?;
            let position = first_divergence(&counter, &mutant.machine, &inputs).ok()??;
            Some((inputs, position))
        });
        match witness {
            Some((inputs, position)) => {
                println!("    detected by {inputs:?} at position {position}")
            }
            None => println!("    no distinguishing sequence found"),
        }
    }

    println!("\nBatch evaluation (transition-target mutants):");
    let references = BTreeMap::from([
        ("counter".to_string(), counter),
        ("echo".to_string(), echo()),
        ("toggle".to_string(), toggle()),
    ]);

    let harness = Harness::new(HarnessConfig {
        sequence_length: 10,
        trial_count: 2_000,
        seed: 2024,
        ..HarnessConfig::default()
    });
    let report = harness.batch_evaluate(&references, MutationKind::TransitionTarget);

    for (id, outcome) in &report.outcomes {
        match outcome.ratio() {
            Some(ratio) => println!("  {id}: ratio {ratio:.3}"),
            None => println!("  {id}: {outcome:?}"),
        }
    }
    if let Some(mean) = report.mean_ratio() {
        println!("  mean ratio: {mean:.3} ({} excluded)", report.excluded());
    }

    println!("\n=== Campaign Complete ===");
}
