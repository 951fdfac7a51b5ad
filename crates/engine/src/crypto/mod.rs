//! AES-128 modes of operation.
//!
//! This module is intentionally free of file and CLI dependencies. It consumes
//! byte buffers and returns byte buffers.
//!
//! # Output framing
//!
//! ```text
//! ctr, explicit IV   ciphertext
//! ctr, implicit      iv(16) || ciphertext
//! gcm                nonce(12) || ciphertext || tag(16)
//! ```
//!
//! The framing is the only persisted format; there is no version header.

pub mod block;
pub mod ctr;
pub mod gcm;

pub use block::{BlockCipher, Key};
