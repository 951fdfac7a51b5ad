//! AES-128-CTR: the block cipher as a synchronous stream cipher.
//!
//! The full 16-byte IV is the initial counter block and is incremented as one
//! 128-bit big-endian integer per block. Encryption and decryption are the
//! same keystream XOR; only the IV source differs between the two directions.
//!
//! **Never reuse an IV with the same key.** Two ciphertexts under the same
//! key and IV leak the XOR of their plaintexts.

use aes::{cipher::generic_array::GenericArray, Aes128};
use ::ctr::cipher::{InnerIvInit, StreamCipher, StreamCipherCoreWrapper};
use tracing::debug;

use common::{protocol::IV_LEN, EngineError, IvSource};

use super::block::BlockCipher;
use crate::codec::entropy::{fill_exact, EntropySource};

type Aes128CtrCore = ::ctr::CtrCore<Aes128, ::ctr::flavors::Ctr128BE>;

/// XOR `input` with the keystream seeded by `iv`.
///
/// The output is exactly as long as the input.
pub fn apply(cipher: &BlockCipher, iv: &[u8; IV_LEN], input: &[u8]) -> Vec<u8> {
    let core = Aes128CtrCore::inner_iv_init(cipher.aes().clone(), GenericArray::from_slice(iv));
    let mut stream = StreamCipherCoreWrapper::from_core(core);
    let mut output = input.to_vec();
    stream.apply_keystream(&mut output);
    output
}

/// Run counter mode with the given IV source and produce the framed output.
///
/// - [`IvSource::Explicit`]: output is the bare transformed payload.
/// - [`IvSource::ExtractFromPrefix`]: the first [`IV_LEN`] input bytes are the
///   IV; the rest is transformed.
/// - [`IvSource::GenerateAndEmbed`]: a fresh IV is drawn from `entropy` and
///   written in front of the transformed payload.
///
/// # Errors
///
/// Returns [`EngineError::TruncatedInput`] if a prefix is expected but the input
/// is shorter than [`IV_LEN`], and [`EngineError::EntropySourceError`] if a
/// fresh IV cannot be drawn.
pub fn process(
    cipher: &BlockCipher,
    source: &IvSource,
    input: &[u8],
    entropy: &dyn EntropySource,
) -> Result<Vec<u8>, EngineError> {
    match source {
        IvSource::Explicit(iv) => Ok(apply(cipher, iv, input)),
        IvSource::ExtractFromPrefix => {
            if input.len() < IV_LEN {
                return Err(EngineError::TruncatedInput {
                    required: IV_LEN,
                    actual: input.len(),
                });
            }
            let (prefix, payload) = input.split_at(IV_LEN);
            let mut iv = [0u8; IV_LEN];
            iv.copy_from_slice(prefix);
            debug!(payload_len = payload.len(), "ctr: IV taken from input prefix");
            Ok(apply(cipher, &iv, payload))
        }
        IvSource::GenerateAndEmbed => {
            let mut iv = [0u8; IV_LEN];
            fill_exact(entropy, &mut iv)?;
            let mut output = Vec::with_capacity(IV_LEN + input.len());
            output.extend_from_slice(&iv);
            output.extend_from_slice(&apply(cipher, &iv, input));
            debug!(payload_len = input.len(), "ctr: fresh IV embedded in output");
            Ok(output)
        }
    }
}
