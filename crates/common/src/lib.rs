//! Error taxonomy and operation selector types shared across `pscrypt` crates.

pub mod error;
pub mod protocol;

pub use error::EngineError;
pub use protocol::{Direction, IvSource, Operation};
