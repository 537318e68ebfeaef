use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use walkdir::WalkDir;

use super::Error;

/// Output folder of the web interface build.
pub const DEFAULT_FOLDER: &str = "./data/_next";

/// Outcome of [`compress_folder`].
#[derive(Default, Debug)]
pub struct CompressReport {
    /// Pairs of original file and written `.gz` file.
    pub compressed: Vec<(PathBuf, PathBuf)>,
    /// Files that already were gzip archives.
    pub skipped: Vec<PathBuf>,
}

/// Gzips `path` into `path.gz` and removes `path`.
pub fn compress_file(path: &Path) -> Result<PathBuf, Error> {
    let mut gz_path = OsString::from(path.as_os_str());
    gz_path.push(".gz");
    let gz_path = PathBuf::from(gz_path);

    let mut input = BufReader::new(File::open(path)?);
    let output = BufWriter::new(File::create(&gz_path)?);
    let mut encoder = GzEncoder::new(output, Compression::best());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?.into_inner().map_err(|e| e.into_error())?;
    drop(input);

    fs::remove_file(path)?;
    log::info!(
        "Compressed and deleted: {} -> {}",
        path.display(),
        gz_path.display()
    );
    Ok(gz_path)
}

/// Compresses every file below `folder` that is not a `.gz` file yet.
pub fn compress_folder(folder: &Path) -> Result<CompressReport, Error> {
    if !folder.exists() {
        return Err(Error::FolderNotFound(folder.to_path_buf()));
    }

    // List everything first so the archives written below are not visited.
    let mut files = Vec::new();
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry?;
        // Follows symlinks, so linked files are compressed as well.
        if entry.path().is_file() {
            files.push(entry.into_path());
        }
    }

    let mut report = CompressReport::default();
    for file in files {
        let is_gz = file
            .file_name()
            .map_or(false, |name| name.to_string_lossy().ends_with(".gz"));
        if is_gz {
            log::info!("Skipping already compressed file: {}", file.display());
            report.skipped.push(file);
            continue;
        }
        let gz_path = compress_file(&file)?;
        report.compressed.push((file, gz_path));
    }
    Ok(report)
}
