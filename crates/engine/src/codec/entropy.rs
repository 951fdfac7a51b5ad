//! Cryptographically secure random bytes for IVs and nonces.

use std::io;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use common::EngineError;

/// A source of cryptographically secure random bytes.
///
/// Implementations must be safe to share between threads; concurrent engine
/// invocations draw from the same source.
#[cfg_attr(test, mockall::automock)]
pub trait EntropySource: Send + Sync {
    /// Fill as much of `dest` as possible and return the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying source is unavailable.
    fn try_fill(&self, dest: &mut [u8]) -> io::Result<usize>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn try_fill(&self, dest: &mut [u8]) -> io::Result<usize> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| io::Error::other(e.to_string()))?;
        Ok(dest.len())
    }
}

/// Draw exactly `n` random bytes from `source`.
///
/// A short read is a failure: the buffer is never padded and the read is never
/// retried.
///
/// # Errors
///
/// Returns [`EngineError::EntropySourceError`] if the source errors or
/// produces fewer than `n` bytes.
pub fn random_bytes(source: &dyn EntropySource, n: usize) -> Result<Vec<u8>, EngineError> {
    let mut buf = vec![0u8; n];
    fill_exact(source, &mut buf)?;
    Ok(buf)
}

/// Fill a fixed-size buffer with random bytes; see [`random_bytes`].
pub(crate) fn fill_exact(source: &dyn EntropySource, buf: &mut [u8]) -> Result<(), EngineError> {
    let requested = buf.len();
    let produced = source
        .try_fill(buf)
        .map_err(|_| EngineError::EntropySourceError {
            requested,
            produced: 0,
        })?;
    if produced < requested {
        return Err(EngineError::EntropySourceError {
            requested,
            produced,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_entropy_fills_request() {
        let bytes = random_bytes(&OsEntropy, 32).unwrap();
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn zero_length_request_is_empty() {
        assert!(random_bytes(&OsEntropy, 0).unwrap().is_empty());
    }

    #[test]
    fn short_read_is_an_error() {
        let mut source = MockEntropySource::new();
        source
            .expect_try_fill()
            .times(1)
            .returning(|dest| Ok(dest.len() - 1));
        assert_eq!(
            random_bytes(&source, 16),
            Err(EngineError::EntropySourceError {
                requested: 16,
                produced: 15
            })
        );
    }

    #[test]
    fn source_failure_is_not_retried() {
        let mut source = MockEntropySource::new();
        source
            .expect_try_fill()
            .times(1)
            .returning(|_| Err(io::Error::other("no entropy")));
        assert_eq!(
            random_bytes(&source, 12),
            Err(EngineError::EntropySourceError {
                requested: 12,
                produced: 0
            })
        );
    }

    #[test]
    fn successive_draws_differ() {
        let a = random_bytes(&OsEntropy, 16).unwrap();
        let b = random_bytes(&OsEntropy, 16).unwrap();
        assert_ne!(a, b);
    }
}
