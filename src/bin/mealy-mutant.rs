//! CLI driver for the Mealy Mutant engine.
//!
//! # Usage
//!
//! ```bash
//! # Replay an input sequence on a machine
//! mealy-mutant simulate etalon.fsm 0,1,1,0
//!
//! # Derive a mutant and print it in description format
//! mealy-mutant mutate etalon.fsm output 42
//!
//! # Keep a reloadable snapshot of the mutant
//! mealy-mutant mutate etalon.fsm split 42 --policy all --snapshot mutant.json
//!
//! # Estimate the detection ratio of a random mutant
//! mealy-mutant evaluate etalon.fsm target 12 10000 42 --workers 8
//!
//! # Print a Graphviz diagram
//! mealy-mutant render etalon.fsm > fsm.dot
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`). Any format, simulation
//! or mutation error exits with a non-zero status.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mealy_mutant::core::InputSymbol;
use mealy_mutant::description::{load_description, save_description, to_description};
use mealy_mutant::mutation::{mutate_with_policy, MutationKind, SplitPolicy};
use mealy_mutant::oracle::{Harness, HarnessConfig};
use mealy_mutant::render::{DotRenderer, Graph, Renderer};
use mealy_mutant::simulator::Simulator;
use mealy_mutant::snapshot::MachineSnapshot;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mealy-mutant")]
#[command(about = "Mutation-based conformance testing for Mealy machines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input sequence and print every step.
    Simulate {
        /// Machine description file.
        file: PathBuf,

        /// Input symbols, separated by commas or spaces.
        inputs: String,
    },

    /// Derive one random mutant.
    Mutate {
        /// Machine description file.
        file: PathBuf,

        /// Mutation kind: target, output or split (or 0, 1, 2).
        kind: MutationKind,

        /// Random seed for reproducibility.
        seed: u64,

        /// Reconnection policy for state splits: first or all.
        #[arg(short, long, default_value = "first")]
        policy: SplitPolicy,

        /// Write the mutant description here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a JSON snapshot of the mutant and its fault.
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },

    /// Estimate the detection ratio of a random mutant.
    Evaluate {
        /// Machine description file.
        file: PathBuf,

        /// Mutation kind: target, output or split (or 0, 1, 2).
        kind: MutationKind,

        /// Length of each random input sequence.
        sequence_length: usize,

        /// Number of random sequences.
        trials: usize,

        /// Random seed for reproducibility.
        seed: u64,

        /// Worker threads (defaults to available parallelism).
        #[arg(short, long)]
        workers: Option<usize>,

        /// Reconnection policy for state splits: first or all.
        #[arg(short, long, default_value = "first")]
        policy: SplitPolicy,
    },

    /// Print a Graphviz DOT diagram of a machine.
    Render {
        /// Machine description file.
        file: PathBuf,

        /// Graph name in the DOT output.
        #[arg(short, long, default_value = "fsm")]
        name: String,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { file, inputs } => {
            let machine = load_description(&file)?;
            let inputs = parse_inputs(&inputs)?;

            let mut simulator = Simulator::reset(&machine);
            println!("start: state {}", simulator.current_state());
            for input in inputs {
                let step = simulator.step(input)?;
                println!(
                    "input {}: state {}, output {}",
                    input, step.state, step.output
                );
            }
        }

        Commands::Mutate {
            file,
            kind,
            seed,
            policy,
            output,
            snapshot,
        } => {
            let machine = load_description(&file)?;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mutant = mutate_with_policy(&machine, kind, policy, &mut rng)?;
            info!("Applied {:?}", mutant.mutation);

            match &output {
                Some(path) => save_description(&mutant.machine, path)?,
                None => print!("{}", to_description(&mutant.machine)),
            }

            if let Some(path) = snapshot {
                let json = MachineSnapshot::from_mutant(mutant, Some(seed)).to_json()?;
                fs::write(&path, json)
                    .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
                info!("Snapshot saved to {}", path.display());
            }
        }

        Commands::Evaluate {
            file,
            kind,
            sequence_length,
            trials,
            seed,
            workers,
            policy,
        } => {
            let machine = load_description(&file)?;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mutant = mutate_with_policy(&machine, kind, policy, &mut rng)?;
            info!("Evaluating {:?}", mutant.mutation);

            let defaults = HarnessConfig::default();
            let harness = Harness::new(HarnessConfig {
                sequence_length,
                trial_count: trials,
                seed,
                workers: workers.unwrap_or(defaults.workers),
                split_policy: policy,
            });

            let estimate = harness.estimate(&machine, &mutant.machine)?;
            println!("{:.6}", estimate.ratio());
        }

        Commands::Render { file, name } => {
            let machine = load_description(&file)?;
            let dot = DotRenderer { name }.render(&Graph::from_machine(&machine));
            print!("{dot}");
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_inputs(text: &str) -> Result<Vec<InputSymbol>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .with_context(|| format!("Invalid input symbol '{s}'"))
        })
        .collect()
}
