//! Error taxonomy
//!
//! Every variant is a fatal precondition or arithmetic failure; nothing here
//! is transient and nothing is retried. A verifier rejecting a proof is not
//! an error: `verify*` return `false` for that.

#![forbid(unsafe_code)]

/// Errors surfaced by setup, commitment, proving and the codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KzgError {
    /// Requested max degree (or loaded ladder) is too small to be useful.
    #[error("max degree must be at least 1, got {0}")]
    InvalidDegree(usize),
    /// Coefficient vector does not line up with the parameter ladder.
    #[error("length mismatch: ladder expects {expected} coefficients, got {got}")]
    LengthMismatch {
        /// Length required by the ladder.
        expected: usize,
        /// Length supplied by the caller.
        got: usize,
    },
    /// Field inversion of zero (e.g. forging at `u == α`).
    #[error("attempted to invert the zero scalar")]
    NonInvertible,
    /// Lagrange interpolation received the same abscissa twice.
    #[error("interpolation points are not distinct")]
    DuplicatePoint,
    /// Canonical decoding of a scalar or point failed.
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<ark_serialize::SerializationError> for KzgError {
    fn from(err: ark_serialize::SerializationError) -> Self {
        KzgError::Encoding(err.to_string())
    }
}
