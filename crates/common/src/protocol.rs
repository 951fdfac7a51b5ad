//! Operation selector types and framing constants.
//!
//! The caller describes *what* to do with one [`Operation`] value; the engine
//! never infers the direction or the IV source from the shape of the data.

use std::fmt;

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Framing constants
// ---------------------------------------------------------------------------

/// Byte length of an AES-128 key.
pub const KEY_LEN: usize = 16;

/// Byte length of one cipher block.
pub const BLOCK_LEN: usize = 16;

/// Byte length of a counter-mode IV (one full counter block).
pub const IV_LEN: usize = BLOCK_LEN;

/// Byte length of an AES-GCM nonce (96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of an AES-GCM authentication tag.
pub const TAG_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// Encrypt or decrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Where the counter-mode IV comes from. Exactly one source per invocation.
#[derive(Clone, PartialEq, Eq)]
pub enum IvSource {
    /// IV supplied out-of-band; the output carries no prefix.
    Explicit([u8; IV_LEN]),
    /// Draw a fresh IV and write it in front of the ciphertext.
    GenerateAndEmbed,
    /// Consume the first [`IV_LEN`] bytes of the input as the IV.
    ExtractFromPrefix,
}

impl IvSource {
    /// Build an [`IvSource::Explicit`] from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidIVLength`] unless `iv` is exactly [`IV_LEN`] bytes.
    pub fn explicit(iv: &[u8]) -> Result<Self, EngineError> {
        let bytes: [u8; IV_LEN] = iv
            .try_into()
            .map_err(|_| EngineError::InvalidIVLength { actual: iv.len() })?;
        Ok(IvSource::Explicit(bytes))
    }

    /// Collapse the three independent command-line selections into one source.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingIV`] when nothing is selected,
    /// [`EngineError::ConflictingIVSource`] when more than one is selected, and
    /// [`EngineError::InvalidIVLength`] for a wrongly sized explicit IV.
    pub fn from_flags(
        explicit: Option<&[u8]>,
        generate_and_embed: bool,
        extract_from_prefix: bool,
    ) -> Result<Self, EngineError> {
        let selected = [explicit.is_some(), generate_and_embed, extract_from_prefix]
            .iter()
            .filter(|s| **s)
            .count();
        match selected {
            0 => Err(EngineError::MissingIV),
            1 => match explicit {
                Some(iv) => IvSource::explicit(iv),
                None if generate_and_embed => Ok(IvSource::GenerateAndEmbed),
                None => Ok(IvSource::ExtractFromPrefix),
            },
            _ => Err(EngineError::ConflictingIVSource),
        }
    }
}

impl fmt::Debug for IvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // IVs are not secret, but they are kept out of logs alongside keys.
            IvSource::Explicit(_) => f.write_str("Explicit([REDACTED])"),
            IvSource::GenerateAndEmbed => f.write_str("GenerateAndEmbed"),
            IvSource::ExtractFromPrefix => f.write_str("ExtractFromPrefix"),
        }
    }
}

/// A complete description of one engine invocation, minus key and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// AES-128-CTR; the transform is the same in both directions.
    Ctr(IvSource),
    /// AES-128-GCM seal (`Encrypt`) or open (`Decrypt`).
    Gcm(Direction),
}

impl Operation {
    /// Short name used in log fields.
    pub fn mode_name(&self) -> &'static str {
        match self {
            Operation::Ctr(_) => "ctr",
            Operation::Gcm(_) => "gcm",
        }
    }

    /// Number of bytes the output gains (positive) or loses (negative)
    /// relative to the input. The framing never pads, so this is exact.
    pub fn length_delta(&self) -> isize {
        match self {
            Operation::Ctr(IvSource::Explicit(_)) => 0,
            Operation::Ctr(IvSource::GenerateAndEmbed) => IV_LEN as isize,
            Operation::Ctr(IvSource::ExtractFromPrefix) => -(IV_LEN as isize),
            Operation::Gcm(Direction::Encrypt) => (NONCE_LEN + TAG_LEN) as isize,
            Operation::Gcm(Direction::Decrypt) => -((NONCE_LEN + TAG_LEN) as isize),
        }
    }
}
