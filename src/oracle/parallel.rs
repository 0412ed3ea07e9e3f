//! Parallel statistical harness.
//!
//! Trials are spread over a scoped worker pool. Trial `i` of stream `s`
//! always draws its sequence from its own `ChaCha8Rng` seeded by
//! `(seed, s, i)`, so a completed run gives the same estimate for any worker
//! count or scheduling order. Workers share only atomic counters; the first
//! failure is recorded under a mutex and stops further trials.

use super::cancel::CancellationToken;
use super::config::{derive_seed, HarnessConfig};
use super::error::{HarnessError, TrialError};
use super::harness::{check_alphabet, excluded, failed, run_trial};
use super::report::{BatchReport, Estimate, MachineOutcome};
use crate::core::Machine;
use crate::mutation::{mutate_with_policy, MutationKind};
use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Stream used by [`Harness::estimate`] for a standalone pair.
const STANDALONE_STREAM: u64 = 1;

/// Runs detection trials concurrently with reproducible seeding.
///
/// # Example
///
/// ```rust
/// use mealy_mutant::core::Machine;
/// use mealy_mutant::mutation::Mutation;
/// use mealy_mutant::oracle::{Harness, HarnessConfig};
///
/// let reference = Machine::build(
///     2,
///     2,
///     2,
///     0,
///     [(0, 0, 1, 0), (0, 1, 0, 1), (1, 0, 0, 1), (1, 1, 1, 0)],
/// )
/// .unwrap();
/// let mutant = Mutation::TransitionTarget { index: 1, new_target: 1 }
///     .apply(&reference)
///     .unwrap();
///
/// let harness = Harness::new(HarnessConfig {
///     sequence_length: 6,
///     trial_count: 500,
///     seed: 7,
///     workers: 4,
///     ..HarnessConfig::default()
/// });
///
/// let estimate = harness.estimate(&reference, &mutant).unwrap();
/// assert_eq!(estimate.completed, 500);
/// assert!((0.0..=1.0).contains(&estimate.ratio()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Harness {
    config: HarnessConfig,
    cancel: CancellationToken,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Use `token` to stop this harness from elsewhere.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Estimate how often a random sequence distinguishes `mutant` from
    /// `reference`.
    ///
    /// If cancelled, returns the counts of the trials that completed with
    /// `cancelled` set.
    pub fn estimate(&self, reference: &Machine, mutant: &Machine) -> Result<Estimate, HarnessError> {
        let estimate = self.estimate_stream(reference, mutant, STANDALONE_STREAM)?;
        info!(
            "Detection ratio {:.4} ({}/{} trials)",
            estimate.ratio(),
            estimate.detected,
            estimate.completed
        );
        Ok(estimate)
    }

    /// Derive one mutant of `kind` per reference machine and estimate each
    /// detection ratio.
    ///
    /// Machine `j` (in key order) derives its mutant and its trials from
    /// seed streams of its own, so the report is reproducible for a given
    /// seed whatever the worker count.
    pub fn batch_evaluate(
        &self,
        references: &BTreeMap<String, Machine>,
        kind: MutationKind,
    ) -> BatchReport {
        let started_at = Utc::now();
        let mut outcomes = BTreeMap::new();

        for (j, (id, reference)) in references.iter().enumerate() {
            if self.cancel.is_cancelled() {
                outcomes.insert(id.clone(), MachineOutcome::Cancelled);
                continue;
            }

            let machine_stream = (j as u64) << 1;
            let mut rng =
                ChaCha8Rng::seed_from_u64(derive_seed(self.config.seed, machine_stream, 0));

            let derived = mutate_with_policy(reference, kind, self.config.split_policy, &mut rng);
            let outcome = match derived {
                Ok(mutant) => {
                    match self.estimate_stream(reference, &mutant.machine, machine_stream | 1) {
                        Ok(estimate) => {
                            debug!(
                                "Machine '{}': ratio {:.4} for {:?}",
                                id,
                                estimate.ratio(),
                                mutant.mutation
                            );
                            MachineOutcome::Evaluated {
                                mutation: mutant.mutation,
                                estimate,
                            }
                        }
                        Err(err) => failed(id, err),
                    }
                }
                Err(err) => excluded(id, err),
            };
            outcomes.insert(id.clone(), outcome);
        }

        let report = BatchReport {
            id: Uuid::new_v4(),
            kind,
            config: self.config.clone(),
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };

        match report.mean_ratio() {
            Some(mean) => info!(
                "Batch {}: mean ratio {:.4} over {} machines ({} excluded, {} failed)",
                report.id,
                mean,
                report.ratios().len(),
                report.excluded(),
                report.failed()
            ),
            None => warn!("Batch {}: no machine could be evaluated", report.id),
        }
        report
    }

    fn estimate_stream(
        &self,
        reference: &Machine,
        mutant: &Machine,
        stream: u64,
    ) -> Result<Estimate, HarnessError> {
        let config = &self.config;
        check_alphabet(reference, config.sequence_length)?;

        let next_trial = AtomicUsize::new(0);
        let detected = AtomicUsize::new(0);
        let completed = AtomicUsize::new(0);
        let abort = AtomicBool::new(false);
        let failure: Mutex<Option<TrialError>> = Mutex::new(None);

        let workers = config.workers.clamp(1, config.trial_count.max(1));

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    if abort.load(Ordering::Relaxed) || self.cancel.is_cancelled() {
                        break;
                    }
                    let trial = next_trial.fetch_add(1, Ordering::Relaxed);
                    if trial >= config.trial_count {
                        break;
                    }

                    let seed = derive_seed(config.seed, stream, trial as u64);
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);

                    match run_trial(reference, mutant, config.sequence_length, &mut rng) {
                        Ok(hit) => {
                            if hit {
                                detected.fetch_add(1, Ordering::Relaxed);
                            }
                            completed.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(source) => {
                            abort.store(true, Ordering::Relaxed);
                            let mut slot = failure.lock().unwrap_or_else(|e| e.into_inner());
                            // Keep the lowest failing trial seen.
                            if slot.map_or(true, |f| trial < f.trial) {
                                *slot = Some(TrialError { trial, source });
                            }
                        }
                    }
                });
            }
        });

        if let Some(err) = failure.into_inner().unwrap_or_else(|e| e.into_inner()) {
            return Err(err.into());
        }

        let completed = completed.into_inner();
        let estimate = Estimate {
            detected: detected.into_inner(),
            completed,
            requested: config.trial_count,
            cancelled: completed < config.trial_count && self.cancel.is_cancelled(),
        };
        if estimate.cancelled {
            warn!(
                "Cancelled after {}/{} trials",
                estimate.completed, estimate.requested
            );
        }
        Ok(estimate)
    }
}
