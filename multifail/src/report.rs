//! Serializable snapshot of a failure and everything behind it.

use serde::{Deserialize, Serialize};

use crate::failure::Failure;

/// Which variant a reported failure was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FailureKind {
    /// Caller-supplied failure.
    Root,
    /// Aggregation of two or more failures.
    Composite,
    /// Position-tagged message carrier.
    Link,
}

/// Plain-data view of a [`Failure`], suitable for logs or transport.
///
/// Backtraces and wrapped foreign error values are not carried over; only
/// their text is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    /// Variant of the reported failure.
    pub kind: FailureKind,
    /// The failure's own message.
    pub message: Option<String>,
    /// For composites, one report per aggregated failure in input order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<FailureReport>,
    /// Display text of every `source()` behind this failure, nearest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<String>,
}

impl Failure {
    /// Variant tag of this failure.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Root(_) => FailureKind::Root,
            Self::Composite(_) => FailureKind::Composite,
            Self::Link(_) => FailureKind::Link,
        }
    }

    /// Snapshot this failure into a [`FailureReport`].
    #[must_use]
    pub fn report(&self) -> FailureReport {
        FailureReport {
            kind: self.kind(),
            message: self.message().map(str::to_owned),
            causes: self
                .as_composite()
                .map(|c| c.causes().iter().map(|cause| cause.report()).collect())
                .unwrap_or_default(),
            chain: self.chain().skip(1).map(ToString::to_string).collect(),
        }
    }
}

impl From<&Failure> for FailureReport {
    fn from(failure: &Failure) -> Self {
        failure.report()
    }
}
