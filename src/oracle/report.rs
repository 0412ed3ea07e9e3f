//! Results of statistical runs.

use super::config::HarnessConfig;
use crate::mutation::{Mutation, MutationKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Detection counts for one reference/mutant pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    /// Trials whose sequence exposed a divergence
    pub detected: usize,
    /// Trials that ran to completion
    pub completed: usize,
    /// Trials requested
    pub requested: usize,
    /// Whether the run stopped early on cancellation
    pub cancelled: bool,
}

impl Estimate {
    /// Fraction of completed trials that detected the mutant, in `[0, 1]`.
    ///
    /// A run with no completed trials has ratio `0.0`.
    pub fn ratio(&self) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            self.detected as f64 / self.completed as f64
        }
    }
}

/// What happened to one reference machine in a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MachineOutcome {
    /// A mutant was derived and its detection ratio estimated.
    Evaluated {
        mutation: Mutation,
        estimate: Estimate,
    },
    /// No mutant of the requested kind exists for this machine. Excluded
    /// machines do not count towards aggregate ratios.
    Excluded { reason: String },
    /// A trial failed; `trial` is `None` when the failure preceded trials.
    Failed {
        trial: Option<usize>,
        error: String,
    },
    /// The batch was cancelled before this machine was evaluated.
    Cancelled,
}

impl MachineOutcome {
    /// The detection ratio, if the machine was evaluated.
    pub fn ratio(&self) -> Option<f64> {
        match self {
            Self::Evaluated { estimate, .. } => Some(estimate.ratio()),
            _ => None,
        }
    }
}

/// Summary of a batch evaluation over many reference machines.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchReport {
    pub id: Uuid,
    pub kind: MutationKind,
    pub config: HarnessConfig,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: BTreeMap<String, MachineOutcome>,
}

impl BatchReport {
    /// Ratios of all evaluated machines, keyed by machine id.
    pub fn ratios(&self) -> BTreeMap<&str, f64> {
        self.outcomes
            .iter()
            .filter_map(|(id, outcome)| outcome.ratio().map(|r| (id.as_str(), r)))
            .collect()
    }

    /// Mean ratio over evaluated machines, or `None` if none were evaluated.
    pub fn mean_ratio(&self) -> Option<f64> {
        let ratios = self.ratios();
        if ratios.is_empty() {
            None
        } else {
            Some(ratios.values().sum::<f64>() / ratios.len() as f64)
        }
    }

    pub fn excluded(&self) -> usize {
        self.count(|o| matches!(o, MachineOutcome::Excluded { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, MachineOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&MachineOutcome) -> bool) -> usize {
        self.outcomes.values().filter(|o| predicate(o)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::SplitPolicy;

    fn evaluated(detected: usize, completed: usize) -> MachineOutcome {
        MachineOutcome::Evaluated {
            mutation: Mutation::StateSplit {
                state: 0,
                policy: SplitPolicy::FirstIncoming,
            },
            estimate: Estimate {
                detected,
                completed,
                requested: completed,
                cancelled: false,
            },
        }
    }

    #[test]
    fn ratio_of_empty_estimate_is_zero() {
        let estimate = Estimate {
            detected: 0,
            completed: 0,
            requested: 10,
            cancelled: true,
        };
        assert_eq!(estimate.ratio(), 0.0);
    }

    #[test]
    fn report_aggregates_only_evaluated_machines() {
        let now = Utc::now();
        let mut outcomes = BTreeMap::new();
        outcomes.insert("a".to_string(), evaluated(1, 4));
        outcomes.insert("b".to_string(), evaluated(3, 4));
        outcomes.insert(
            "c".to_string(),
            MachineOutcome::Excluded {
                reason: "single state".to_string(),
            },
        );
        outcomes.insert(
            "d".to_string(),
            MachineOutcome::Failed {
                trial: Some(0),
                error: "no transition".to_string(),
            },
        );

        let report = BatchReport {
            id: Uuid::new_v4(),
            kind: MutationKind::Output,
            config: HarnessConfig::default(),
            started_at: now,
            finished_at: now,
            outcomes,
        };

        assert_eq!(report.ratios().len(), 2);
        assert_eq!(report.mean_ratio(), Some(0.5));
        assert_eq!(report.excluded(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn report_serializes_correctly() {
        let now = Utc::now();
        let report = BatchReport {
            id: Uuid::new_v4(),
            kind: MutationKind::StateSplit,
            config: HarnessConfig::default(),
            started_at: now,
            finished_at: now,
            outcomes: BTreeMap::from([("m".to_string(), evaluated(2, 2))]),
        };

        let json = serde_json::to_string(&report).unwrap();
        let deserialized: BatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, report.id);
        assert_eq!(deserialized.outcomes, report.outcomes);
    }
}
