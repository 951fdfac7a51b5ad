//! Single entry point that dispatches one [`Operation`] to its mode engine.

use tracing::debug;

use common::{Direction, EngineError, Operation};

use crate::codec::EntropySource;
use crate::crypto::{ctr, gcm, BlockCipher};

/// Run one encrypt or decrypt invocation.
///
/// A fresh [`BlockCipher`] is keyed for every call. The returned buffer is the
/// complete framed output, ready to be written verbatim.
///
/// # Errors
///
/// Returns [`EngineError::InvalidKeyLength`] for a bad key, and otherwise any
/// error of the selected mode engine.
pub fn run(
    key: &[u8],
    operation: &Operation,
    input: &[u8],
    entropy: &dyn EntropySource,
) -> Result<Vec<u8>, EngineError> {
    let cipher = BlockCipher::from_key_bytes(key)?;
    let output = match operation {
        Operation::Ctr(source) => ctr::process(&cipher, source, input, entropy)?,
        Operation::Gcm(Direction::Encrypt) => gcm::seal(&cipher, input, entropy)?,
        Operation::Gcm(Direction::Decrypt) => gcm::open(&cipher, input)?,
    };
    debug_assert_eq!(
        output.len() as isize,
        input.len() as isize + operation.length_delta()
    );
    debug!(
        mode = operation.mode_name(),
        input_len = input.len(),
        output_len = output.len(),
        "operation complete"
    );
    Ok(output)
}
