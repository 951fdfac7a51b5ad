//! AES-128-GCM seal and open with an embedded random nonce.
//!
//! Wire layout (both directions):
//!
//! ```text
//! nonce (12 bytes) || ciphertext (len(plaintext)) || tag (16 bytes)
//! ```
//!
//! No associated data is authenticated. There is no explicit-nonce path: every
//! seal draws a fresh nonce. **GCM nonce reuse under one key is catastrophic**;
//! it breaks both confidentiality and authentication.

use aes_gcm::{
    aead::{Aead, Payload},
    Aes128Gcm, Nonce,
};
use tracing::debug;

use common::{
    protocol::{NONCE_LEN, TAG_LEN},
    EngineError,
};

use super::block::BlockCipher;
use crate::codec::entropy::{fill_exact, EntropySource};

fn aead(cipher: &BlockCipher) -> Aes128Gcm {
    Aes128Gcm::from(cipher.aes().clone())
}

/// Encrypt and authenticate `input`, returning `nonce || ciphertext || tag`.
///
/// # Errors
///
/// Returns [`EngineError::EntropySourceError`] if a full nonce cannot be drawn
/// from `entropy`, and [`EngineError::MessageTooLong`] past the GCM
/// per-message limit.
pub fn seal(
    cipher: &BlockCipher,
    input: &[u8],
    entropy: &dyn EntropySource,
) -> Result<Vec<u8>, EngineError> {
    let mut nonce = [0u8; NONCE_LEN];
    fill_exact(entropy, &mut nonce)?;

    let sealed = aead(cipher)
        .encrypt(
            Nonce::from_slice(&nonce),
            Payload {
                msg: input,
                aad: &[],
            },
        )
        .map_err(|_| EngineError::MessageTooLong {
            actual: input.len(),
        })?;

    let mut output = Vec::with_capacity(NONCE_LEN + sealed.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&sealed);
    debug!(plaintext_len = input.len(), "gcm: sealed");
    Ok(output)
}

/// Verify and decrypt `nonce || ciphertext || tag`.
///
/// No plaintext is returned unless the tag verifies.
///
/// # Errors
///
/// Returns [`EngineError::TruncatedInput`] if `input` is shorter than
/// `NONCE_LEN + TAG_LEN`, and [`EngineError::AuthenticationFailed`] for any
/// verification failure (wrong key, altered nonce, ciphertext or tag).
pub fn open(cipher: &BlockCipher, input: &[u8]) -> Result<Vec<u8>, EngineError> {
    let required = NONCE_LEN + TAG_LEN;
    if input.len() < required {
        return Err(EngineError::TruncatedInput {
            required,
            actual: input.len(),
        });
    }
    let (nonce, sealed) = input.split_at(NONCE_LEN);
    let plaintext = aead(cipher)
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: sealed,
                aad: &[],
            },
        )
        .map_err(|_| EngineError::AuthenticationFailed)?;
    debug!(plaintext_len = plaintext.len(), "gcm: opened");
    Ok(plaintext)
}
