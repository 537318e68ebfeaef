//! Generators for the tables, archives and build definitions that go into
//! the mcompass firmware image.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod build_flags;
pub mod compress;
pub mod elastic;
pub mod font;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("FreeType error")]
    Freetype(#[from] freetype::Error),
    #[error("directory walk failed")]
    Walk(#[from] walkdir::Error),
    #[error("folder '{}' does not exist", .0.display())]
    FolderNotFound(PathBuf),
    #[error("invalid segment {0:?}, expected rise|fall:START:END:STEPS")]
    InvalidSegment(String),
    #[error("command failed with exit status {code:?}")]
    CommandFailed { code: Option<i32> },
    #[error("unsupported format")]
    UnsupportedFormat,
}
