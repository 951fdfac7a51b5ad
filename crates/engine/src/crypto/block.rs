//! AES-128 block cipher primitive shared by both modes.

use aes::{
    cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit},
    Aes128,
};
use common::{protocol::KEY_LEN, EngineError};

/// Validated 128-bit key material.
///
/// The bytes are zeroed when the value is dropped.
pub struct Key([u8; KEY_LEN]);

impl Key {
    /// Copy `bytes` into a new [`Key`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidKeyLength`] unless `bytes` is exactly
    /// [`KEY_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EngineError> {
        let key: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| EngineError::InvalidKeyLength {
                actual: bytes.len(),
            })?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("Key([REDACTED])")
    }
}

/// A keyed AES-128 instance.
///
/// Performs single-block encipher operations and is handed to the CTR and GCM
/// engines. Holds no state beyond the expanded key schedule.
#[derive(Clone)]
pub struct BlockCipher {
    inner: Aes128,
}

impl BlockCipher {
    pub fn new(key: &Key) -> Self {
        Self {
            inner: Aes128::new(GenericArray::from_slice(key.as_bytes())),
        }
    }

    /// Validate raw key bytes and build the cipher in one step.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
    pub fn from_key_bytes(key: &[u8]) -> Result<Self, EngineError> {
        Ok(Self::new(&Key::from_slice(key)?))
    }

    /// Encipher one 16-byte block in place.
    pub fn encrypt_block(&self, block: &mut [u8; 16]) {
        self.inner
            .encrypt_block(GenericArray::from_mut_slice(block.as_mut_slice()));
    }

    pub(crate) fn aes(&self) -> &Aes128 {
        &self.inner
    }
}

impl std::fmt::Debug for BlockCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BlockCipher(Aes128)")
    }
}
