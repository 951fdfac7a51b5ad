//! `pscrypt` — CLI entry point.
//!
//! Startup sequence:
//! 1. Parse command-line arguments.
//! 2. Load and validate [`Config`] from `PSCRYPT_*` environment variables.
//! 3. Initialise logging to stderr.
//! 4. Decode the key, read the input file, run the engine, write the output file.
//!
//! A failure is logged once at `error` level. Engine failures map to distinct
//! exit codes via [`EngineError::exit_code`]; every other failure exits with 1.

mod cli;
mod config;
mod files;
mod telemetry;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use common::EngineError;
use engine::OsEntropy;
use tracing::{error, info};

use cli::Cli;
use config::Config;

fn main() -> ExitCode {
    // -----------------------------------------------------------------------
    // 1. Arguments
    // -----------------------------------------------------------------------
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Telemetry is not yet up; write to stderr directly.
            eprintln!("ERROR: configuration invalid: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    if let Err(e) = telemetry::init(&cfg) {
        eprintln!("ERROR: {e:#}");
        return ExitCode::FAILURE;
    }

    // -----------------------------------------------------------------------
    // 4. Encrypt / decrypt
    // -----------------------------------------------------------------------
    match execute(&cli, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report_failure(&e)),
    }
}

fn execute(cli: &Cli, cfg: &Config) -> Result<()> {
    let (operation, io) = cli.command.operation()?;
    let key = cli::decode_key(&io.key)?;

    let input = files::read_input(&io.input)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = operation.mode_name(),
        input_len = input.len(),
        "pscrypt starting"
    );

    let output = engine::run(key.as_bytes(), &operation, &input, &OsEntropy)?;
    files::write_output(&io.output, &output, cfg.overwrite)?;

    info!(output_len = output.len(), "output written");
    Ok(())
}

/// Log a failed run once at `error` level and return its exit code.
fn report_failure(err: &anyhow::Error) -> u8 {
    let code = exit_code(err);
    error!(exit_code = code, "{err:#}");
    code
}

/// Exit code for a failed run: the engine's own mapping, or 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<EngineError>()
        .map(EngineError::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    const KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";

    fn cfg() -> Config {
        Config {
            log_level: "warn".into(),
            log_format: LogFormat::Text,
            overwrite: true,
        }
    }

    fn run_cli(args: &[&str]) -> Result<()> {
        execute(&Cli::try_parse_from(args.iter().copied())?, &cfg())
    }

    #[test]
    fn ctr_implicit_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("clip.mp4");
        let enc = dir.path().join("clip.enc");
        let dec = dir.path().join("clip.dec");
        std::fs::write(&plain, b"not really a video").unwrap();

        let (p, e, d) = (plain.to_str().unwrap(), enc.to_str().unwrap(), dec.to_str().unwrap());
        run_cli(&["pscrypt", "ctr", "-E", "-i", p, "-o", e, "-k", KEY]).unwrap();
        assert_eq!(std::fs::read(&enc).unwrap().len(), 16 + 18);
        run_cli(&["pscrypt", "ctr", "-D", "-i", e, "-o", d, "-k", KEY]).unwrap();
        assert_eq!(std::fs::read(&dec).unwrap(), b"not really a video");
    }

    #[test]
    fn gcm_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("clip.mp4");
        let enc = dir.path().join("clip.enc");
        let dec = dir.path().join("clip.dec");
        std::fs::write(&plain, b"frames").unwrap();

        let (p, e, d) = (plain.to_str().unwrap(), enc.to_str().unwrap(), dec.to_str().unwrap());
        run_cli(&["pscrypt", "e", "-i", p, "-o", e, "-k", KEY]).unwrap();
        run_cli(&["pscrypt", "d", "-i", e, "-o", d, "-k", KEY]).unwrap();
        assert_eq!(std::fs::read(&dec).unwrap(), b"frames");
    }

    #[test]
    fn failed_authentication_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("clip.mp4");
        let enc = dir.path().join("clip.enc");
        let dec = dir.path().join("clip.dec");
        std::fs::write(&plain, b"frames").unwrap();

        let (p, e, d) = (plain.to_str().unwrap(), enc.to_str().unwrap(), dec.to_str().unwrap());
        run_cli(&["pscrypt", "encrypt", "-i", p, "-o", e, "-k", KEY]).unwrap();
        let mut sealed = std::fs::read(&enc).unwrap();
        let last = sealed.len() - 1;
        sealed[last] = sealed[last].wrapping_add(1);
        std::fs::write(&enc, &sealed).unwrap();

        let err = run_cli(&["pscrypt", "decrypt", "-i", e, "-o", d, "-k", KEY]).unwrap_err();
        assert_eq!(exit_code(&err), 5);
        assert!(!dec.exists());
    }

    /// Shared buffer standing in for stderr.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failure_is_logged_at_error_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::ERROR)
            .with_ansi(false)
            .finish();

        let err = anyhow::Error::from(EngineError::AuthenticationFailed);
        let code = tracing::subscriber::with_default(subscriber, || report_failure(&err));

        assert_eq!(code, 5);
        let logged = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("ERROR"));
        assert!(logged.contains("authentication failed"));
        assert!(logged.contains("exit_code=5"));
    }

    #[test]
    fn exit_codes_for_engine_and_io_errors() {
        let err = run_cli(&["pscrypt", "ctr", "-i", "x", "-o", "y", "-k", KEY]).unwrap_err();
        assert_eq!(exit_code(&err), 2);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let out = dir.path().join("out");
        let err = run_cli(&[
            "pscrypt",
            "encrypt",
            "-i",
            missing.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-k",
            KEY,
        ])
        .unwrap_err();
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn truncated_implicit_input_exits_3() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("short");
        let out = dir.path().join("out");
        std::fs::write(&input, b"tiny").unwrap();
        let err = run_cli(&[
            "pscrypt",
            "ctr",
            "-D",
            "-i",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-k",
            KEY,
        ])
        .unwrap_err();
        assert_eq!(exit_code(&err), 3);
    }
}
