//! Mutation selectors and policies.

use super::error::{InvalidMutationKindError, InvalidSplitPolicyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three fault-injection operators.
///
/// Parses from a name or numeric code, case-insensitively:
///
/// ```rust
/// use mealy_mutant::mutation::MutationKind;
///
/// assert_eq!("target".parse(), Ok(MutationKind::TransitionTarget));
/// assert_eq!("1".parse(), Ok(MutationKind::Output));
/// assert_eq!("State-Split".parse(), Ok(MutationKind::StateSplit));
/// assert!("swap".parse::<MutationKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MutationKind {
    /// Redirect one transition to a different target state
    TransitionTarget,
    /// Change the output symbol of one transition
    Output,
    /// Add a state duplicating an existing one and steal one incoming edge.
    /// Random draws only pick states that already have an incoming edge.
    StateSplit,
}

impl MutationKind {
    pub const ALL: [MutationKind; 3] = [Self::TransitionTarget, Self::Output, Self::StateSplit];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TransitionTarget => "transition-target",
            Self::Output => "output",
            Self::StateSplit => "state-split",
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::TransitionTarget => 0,
            Self::Output => 1,
            Self::StateSplit => 2,
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MutationKind {
    type Err = InvalidMutationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "target" | "transition-target" | "transition_target" => {
                Ok(Self::TransitionTarget)
            }
            "1" | "output" => Ok(Self::Output),
            "2" | "split" | "state-split" | "state_split" => Ok(Self::StateSplit),
            _ => Err(InvalidMutationKindError {
                selector: s.to_string(),
            }),
        }
    }
}

impl TryFrom<u8> for MutationKind {
    type Error = InvalidMutationKindError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(InvalidMutationKindError {
                selector: code.to_string(),
            })
    }
}

/// How a state split reconnects incoming edges to the new state.
///
/// Either way the split state must have an incoming edge, so random splits
/// are drawn from those states only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitPolicy {
    /// Redirect only the first incoming transition in declaration order.
    /// The new state is reachable but only partially takes over.
    #[default]
    FirstIncoming,
    /// Redirect every transition targeting the split state, copies included.
    AllIncoming,
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstIncoming => f.write_str("first-incoming"),
            Self::AllIncoming => f.write_str("all-incoming"),
        }
    }
}

impl FromStr for SplitPolicy {
    type Err = InvalidSplitPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first-incoming" => Ok(Self::FirstIncoming),
            "all" | "all-incoming" => Ok(Self::AllIncoming),
            _ => Err(InvalidSplitPolicyError {
                selector: s.to_string(),
            }),
        }
    }
}
