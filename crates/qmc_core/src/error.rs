//! Error types for structured error handling.
//!
//! This module provides [`QmcError`], the single error type shared by the
//! point-set, lattice and randomisation layers. Every failure is reported
//! synchronously and before any point set has been mutated.

use thiserror::Error;

/// Categorised quasi-Monte Carlo errors.
///
/// # Variants
/// - `InvalidArgument`: a parameter or capability precondition was violated
/// - `Unimplemented`: a recognised feature path that this library does not provide
///
/// # Examples
/// ```
/// use qmc_core::error::QmcError;
///
/// let err = QmcError::invalid_argument("KorobovLatticeSequence::new", "base must be >= 2, got 1");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid argument in KorobovLatticeSequence::new: base must be >= 2, got 1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QmcError {
    /// A parameter or capability precondition was violated.
    #[error("Invalid argument in {operation}: {reason}")]
    InvalidArgument {
        /// Operation that rejected the argument.
        operation: &'static str,
        /// Offending parameter or missing capability.
        reason: String,
    },

    /// A recognised feature path that is not provided.
    #[error("Not implemented: {0}")]
    Unimplemented(String),
}

impl QmcError {
    /// Shorthand for [`QmcError::InvalidArgument`].
    pub fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        QmcError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`QmcError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, QmcError::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = QmcError::invalid_argument(
            "StripedScrambleShift::randomise",
            "point set lacks the DigitalNet matrix-scramble capability",
        );
        let msg = err.to_string();
        assert!(msg.contains("StripedScrambleShift::randomise"));
        assert!(msg.contains("DigitalNet"));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_unimplemented_display() {
        let err = QmcError::Unimplemented("left matrix scramble".to_string());
        assert_eq!(err.to_string(), "Not implemented: left matrix scramble");
        assert!(!err.is_invalid_argument());
    }
}
