//! Command-line surface: subcommands, flags, and their translation into an
//! engine [`Operation`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use common::{
    protocol::{IV_LEN, KEY_LEN},
    Direction, EngineError, IvSource, Operation,
};
use engine::{decode_hex, Key};

/// Encrypt video files in AES CTR provided a key and optionally an IV.
#[derive(Debug, Parser)]
#[command(name = "pscrypt", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Operate in counter mode
    Ctr(CtrArgs),
    /// Encrypt input to output (AES-GCM)
    #[command(visible_alias = "e")]
    Encrypt(IoArgs),
    /// Decrypt input to output (AES-GCM)
    #[command(visible_alias = "d")]
    Decrypt(IoArgs),
}

/// Flags shared by every subcommand.
#[derive(Debug, Args)]
pub struct IoArgs {
    /// Input file
    #[arg(short = 'i', long = "in", value_name = "FILE")]
    pub input: PathBuf,

    /// Output file
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    pub output: PathBuf,

    /// Key as 16-byte hex string (32 characters)
    #[arg(short = 'k', long = "key", value_name = "HEX")]
    pub key: String,
}

#[derive(Debug, Args)]
pub struct CtrArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// IV as 16-byte hex string (32 characters)
    #[arg(long, value_name = "HEX")]
    pub iv: Option<String>,

    /// Generate a random 16-byte IV and prepend it to the output file
    #[arg(short = 'E', long)]
    pub implicit_encrypt: bool,

    /// Use first 16 bytes of file as IV for decryption
    #[arg(short = 'D', long)]
    pub implicit_decrypt: bool,
}

impl Command {
    /// Resolve the engine operation and the I/O flags for this subcommand.
    ///
    /// # Errors
    ///
    /// Returns the [`IvSource::from_flags`] errors for `ctr`, or a decoding
    /// error for a malformed `--iv`.
    pub fn operation(&self) -> Result<(Operation, &IoArgs), EngineError> {
        match self {
            Command::Ctr(args) => {
                let iv = args.iv.as_deref().map(decode_iv).transpose()?;
                let source =
                    IvSource::from_flags(iv.as_deref(), args.implicit_encrypt, args.implicit_decrypt)?;
                Ok((Operation::Ctr(source), &args.io))
            }
            Command::Encrypt(io) => Ok((Operation::Gcm(Direction::Encrypt), io)),
            Command::Decrypt(io) => Ok((Operation::Gcm(Direction::Decrypt), io)),
        }
    }
}

/// Decode the `--key` argument into validated key material.
///
/// # Errors
///
/// Returns [`EngineError::InvalidHexEncoding`] or [`EngineError::InvalidKeyLength`].
pub fn decode_key(text: &str) -> Result<Key, EngineError> {
    let mut bytes = decode_hex(text, KEY_LEN).map_err(|e| match e {
        EngineError::UnexpectedLength { actual, .. } => EngineError::InvalidKeyLength { actual },
        other => other,
    })?;
    let key = Key::from_slice(&bytes);
    bytes.iter_mut().for_each(|b| *b = 0);
    key
}

fn decode_iv(text: &str) -> Result<Vec<u8>, EngineError> {
    decode_hex(text, IV_LEN).map_err(|e| match e {
        EngineError::UnexpectedLength { actual, .. } => EngineError::InvalidIVLength { actual },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const KEY: &str = "000102030405060708090a0b0c0d0e0f";

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ctr_with_explicit_iv() {
        let cli = parse(&["pscrypt", "ctr", "-i", "a", "-o", "b", "-k", KEY, "--iv", KEY]);
        let (op, io) = cli.command.operation().unwrap();
        let expected: [u8; IV_LEN] = core::array::from_fn(|i| i as u8);
        assert_eq!(op, Operation::Ctr(IvSource::Explicit(expected)));
        assert_eq!(io.input, PathBuf::from("a"));
        assert_eq!(io.output, PathBuf::from("b"));
    }

    #[test]
    fn ctr_implicit_flags() {
        let cli = parse(&["pscrypt", "ctr", "-E", "-i", "a", "-o", "b", "-k", KEY]);
        assert_eq!(
            cli.command.operation().unwrap().0,
            Operation::Ctr(IvSource::GenerateAndEmbed)
        );
        let cli = parse(&["pscrypt", "ctr", "--implicit-decrypt", "-i", "a", "-o", "b", "-k", KEY]);
        assert_eq!(
            cli.command.operation().unwrap().0,
            Operation::Ctr(IvSource::ExtractFromPrefix)
        );
    }

    #[test]
    fn ctr_without_iv_source_is_missing_iv() {
        let cli = parse(&["pscrypt", "ctr", "-i", "a", "-o", "b", "-k", KEY]);
        assert_eq!(cli.command.operation().unwrap_err(), EngineError::MissingIV);
    }

    #[test]
    fn ctr_with_two_sources_conflicts() {
        let cli = parse(&["pscrypt", "ctr", "-E", "-D", "-i", "a", "-o", "b", "-k", KEY]);
        assert_eq!(cli.command.operation().unwrap_err(), EngineError::ConflictingIVSource);
    }

    #[test]
    fn short_iv_is_invalid_iv_length() {
        let cli = parse(&["pscrypt", "ctr", "--iv", "0011", "-i", "a", "-o", "b", "-k", KEY]);
        assert_eq!(
            cli.command.operation().unwrap_err(),
            EngineError::InvalidIVLength { actual: 2 }
        );
    }

    #[test]
    fn gcm_aliases() {
        let cli = parse(&["pscrypt", "e", "-i", "a", "-o", "b", "-k", KEY]);
        assert_eq!(cli.command.operation().unwrap().0, Operation::Gcm(Direction::Encrypt));
        let cli = parse(&["pscrypt", "decrypt", "-i", "a", "-o", "b", "-k", KEY]);
        assert_eq!(cli.command.operation().unwrap().0, Operation::Gcm(Direction::Decrypt));
    }

    #[test]
    fn missing_required_flag_is_a_parse_error() {
        assert!(Cli::try_parse_from(["pscrypt", "encrypt", "-i", "a", "-o", "b"]).is_err());
    }

    #[test]
    fn decode_key_checks_length_and_hex() {
        assert!(decode_key(KEY).is_ok());
        assert_eq!(
            decode_key("0011").unwrap_err(),
            EngineError::InvalidKeyLength { actual: 2 }
        );
        assert_eq!(decode_key("not hex").unwrap_err(), EngineError::InvalidHexEncoding);
    }
}
