//! Engine error taxonomy shared by the engine and the CLI.

use thiserror::Error;

use crate::protocol::{IV_LEN, KEY_LEN};

/// Every failure the mode-of-operation engine can report.
///
/// All variants are terminal for the current invocation. Variants map to
/// process exit codes chosen by the CLI:
/// - validation and usage errors → 2
/// - [`EngineError::TruncatedInput`] → 3
/// - [`EngineError::EntropySourceError`] → 4
/// - [`EngineError::AuthenticationFailed`] → 5
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The key is not exactly [`KEY_LEN`] bytes.
    #[error("invalid key length: expected {KEY_LEN} bytes, got {actual}")]
    InvalidKeyLength { actual: usize },

    /// An explicit counter-mode IV is not exactly [`IV_LEN`] bytes.
    #[error("invalid IV length: expected {IV_LEN} bytes, got {actual}")]
    InvalidIVLength { actual: usize },

    /// Counter mode was invoked without any IV source.
    #[error("no IV source selected: provide an IV or use -E/-D")]
    MissingIV,

    /// More than one IV source was selected at the same time.
    #[error("conflicting IV sources: choose exactly one of --iv, -E or -D")]
    ConflictingIVSource,

    /// The input is too short to contain the expected prefix (and tag).
    #[error("truncated input: need at least {required} bytes, got {actual}")]
    TruncatedInput { required: usize, actual: usize },

    /// The random source failed or produced fewer bytes than requested.
    #[error("entropy source error: requested {requested} random bytes, got {produced}")]
    EntropySourceError { requested: usize, produced: usize },

    /// Authenticated decryption failed.
    ///
    /// Deliberately carries no detail about which check failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The plaintext exceeds the GCM per-message limit (2^36 - 32 bytes).
    #[error("message too long for a single GCM seal: {actual} bytes")]
    MessageTooLong { actual: usize },

    /// A hex string could not be decoded.
    #[error("invalid hex encoding")]
    InvalidHexEncoding,

    /// A hex string decoded to the wrong number of bytes.
    #[error("unexpected length: expected {expected} bytes, got {actual}")]
    UnexpectedLength { expected: usize, actual: usize },
}

impl EngineError {
    /// Returns the process exit code the CLI should use for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            EngineError::InvalidKeyLength { .. }
            | EngineError::InvalidIVLength { .. }
            | EngineError::MissingIV
            | EngineError::ConflictingIVSource
            | EngineError::InvalidHexEncoding
            | EngineError::UnexpectedLength { .. }
            | EngineError::MessageTooLong { .. } => 2,
            EngineError::TruncatedInput { .. } => 3,
            EngineError::EntropySourceError { .. } => 4,
            EngineError::AuthenticationFailed => 5,
        }
    }
}
