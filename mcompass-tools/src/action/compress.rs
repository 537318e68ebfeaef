//! Helper function to compress the web interface assets given a [`CompressConfig`].

use anyhow::Result;
use mcompass_assets::{compress::compress_folder, Error};

use crate::cli::compress::CompressConfig;

/// Gzips every file below the configured folder.
///
/// A missing folder is reported and otherwise ignored.
///
/// # Errors
///
/// Returns errors if a file cannot be compressed.
pub fn compress(config: CompressConfig) -> Result<()> {
    let report = match compress_folder(&config.folder) {
        Ok(report) => report,
        Err(error @ Error::FolderNotFound(_)) => {
            log::error!("{}", error);
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };
    log::info!(
        "{} files compressed, {} skipped",
        report.compressed.len(),
        report.skipped.len()
    );
    println!("Compression completed!");

    Ok(())
}
