//! Implementations of the [`Action`][action]s.
//!
//! [action]: crate::cli::Action

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};

pub mod build_flags;
pub mod compress;
pub mod elastic;
pub mod font;

/// Writes generated `text` to `output`, or to standard output if there is none.
///
/// # Errors
///
/// Returns errors if the file cannot be written or standard output is closed.
pub fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("error writing \"{}\"", path.display()))?;
            log::info!("wrote \"{}\"", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
