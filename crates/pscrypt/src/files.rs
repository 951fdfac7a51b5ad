//! Reading the whole input file and writing the finished output file.
//!
//! The output file is only created after the engine has produced its full
//! result, so a failed decryption never leaves a partial file behind.

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};

/// Read the entire input file into memory.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read input file {}", path.display()))
}

/// Write `data` verbatim to `path`.
///
/// When `overwrite` is `false` an existing file at `path` is an error.
///
/// # Errors
///
/// Returns an error if the file exists (and may not be replaced) or cannot be
/// written.
pub fn write_output(path: &Path, data: &[u8], overwrite: bool) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options
        .open(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    file.write_all(data)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("failed to flush output file {}", path.display()))?;
    Ok(())
}
