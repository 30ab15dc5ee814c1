//! Error types for estimator input validation.

use std::fmt;

use thiserror::Error;

/// Which of the three sample groups a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupId {
    X,
    Y,
    Z,
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupId::X => write!(f, "X"),
            GroupId::Y => write!(f, "Y"),
            GroupId::Z => write!(f, "Z"),
        }
    }
}

/// Errors raised while validating the sample groups, before any
/// distribution is built.
///
/// These are caller errors (bad input) and are always surfaced. Internal
/// invariant violations during the CMI computation (e.g. a missing marginal
/// mass for an observed joint event) are debug assertions instead, since
/// they indicate a bug in distribution derivation rather than bad input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One of the X, Y, Z groups contains no variables.
    #[error("sample group {group} has no variables")]
    EmptyGroup { group: GroupId },

    /// A variable's sample count disagrees with the common length N,
    /// within its group or across groups.
    #[error("variable {index} of group {group} has {actual} samples, expected {expected}")]
    LengthMismatch {
        group: GroupId,
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// The common sample length N is zero.
    #[error("sample sequences have zero length")]
    ZeroLengthSamples,
}
