//! Mode-of-operation engine for `pscrypt`.
//!
//! Turns AES-128 into either a counter-mode stream cipher or AES-GCM
//! authenticated encryption, and owns the IV/nonce generation and framing
//! rules. Every call is a pure function of its arguments plus the supplied
//! [`EntropySource`]; nothing is cached between invocations.

pub mod codec;
pub mod crypto;
mod run;

pub use codec::{decode_hex, random_bytes, EntropySource, OsEntropy};
pub use crypto::{BlockCipher, Key};
pub use run::run;
