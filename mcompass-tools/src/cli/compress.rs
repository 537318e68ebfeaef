//! Command line parsing and [`Action::Compress`][ac] construction.
//!
//! [ac]: crate::cli::Action::Compress

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgMatches, Command};
use mcompass_assets::compress::DEFAULT_FOLDER;

/// Description of a compression run.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CompressConfig {
    /// The folder whose files are compressed.
    pub folder: PathBuf,
}

/// Parses the arguments required to produce a valid [`CompressConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> CompressConfig {
    let folder = matches
        .get_one::<PathBuf>("folder")
        .cloned()
        .unwrap_or_else(|| unreachable!("`folder` has a default value"));

    CompressConfig { folder }
}

/// Returns the command parser for an [`Action::Compress`][ac].
///
/// [ac]: crate::cli::Action::Compress
pub fn subcommand_parser() -> Command {
    let folder = Arg::new("folder")
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_FOLDER);

    Command::new("compress")
        .about("Gzip every file below a folder and delete the originals")
        .arg(folder)
}
