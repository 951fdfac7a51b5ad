//! Key/nonce codec: hex decoding of user-supplied material and random IV/nonce
//! generation.

pub mod entropy;
pub mod hex;

pub use self::entropy::{random_bytes, EntropySource, OsEntropy};
pub use self::hex::decode_hex;

#[cfg(test)]
pub use self::entropy::MockEntropySource;
