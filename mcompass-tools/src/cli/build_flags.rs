//! Command line parsing and [`Action::BuildFlags`][ac] construction.
//!
//! [ac]: crate::cli::Action::BuildFlags

use std::path::PathBuf;

use clap::{builder::EnumValueParser, value_parser, Arg, ArgMatches, Command};
use mcompass_assets::build_flags::FIRMWARE_VERSION;

use crate::common::{FlagsFormat, Revision};

/// Description of the build definitions to emit.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct BuildFlagsConfig {
    /// A directory inside the firmware's git repository.
    pub repo: PathBuf,
    /// The firmware version.
    pub version: String,
    /// The [`Revision`] whose defaults replace unset environment variables.
    pub fallback: Revision,
    /// The [`FlagsFormat`] of the output.
    pub format: FlagsFormat,
    /// Where to write the definitions. Standard output if [`None`].
    pub output: Option<PathBuf>,
}

/// Parses the arguments required to produce a valid [`BuildFlagsConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> BuildFlagsConfig {
    let repo = matches
        .get_one::<PathBuf>("repo")
        .cloned()
        .unwrap_or_else(|| unreachable!("`repo` has a default value"));
    let version = matches
        .get_one::<String>("build-version")
        .cloned()
        .unwrap_or_else(|| unreachable!("`build-version` has a default value"));
    let fallback = matches
        .get_one::<Revision>("fallback")
        .copied()
        .unwrap_or_default();
    let format = matches
        .get_one::<FlagsFormat>("format")
        .copied()
        .unwrap_or_default();
    let output = matches.get_one::<PathBuf>("output").cloned();

    BuildFlagsConfig {
        repo,
        version,
        fallback,
        format,
        output,
    }
}

/// Returns the command parser for an [`Action::BuildFlags`][ac].
///
/// [ac]: crate::cli::Action::BuildFlags
pub fn subcommand_parser() -> Command {
    let repo = Arg::new("repo")
        .long("repo")
        .value_parser(value_parser!(PathBuf))
        .default_value(".");

    let version = Arg::new("build-version")
        .long("build-version")
        .default_value(FIRMWARE_VERSION);

    let fallback = Arg::new("fallback")
        .long("fallback")
        .help("Hardware revision whose defaults apply to unset DEFAULT_* variables")
        .value_parser(EnumValueParser::<Revision>::new());

    let format = Arg::new("format")
        .long("format")
        .value_parser(EnumValueParser::<FlagsFormat>::new());

    let output = Arg::new("output")
        .long("output")
        .short('o')
        .value_parser(value_parser!(PathBuf));

    Command::new("build-flags")
        .about("Emit git metadata and DEFAULT_* settings as preprocessor definitions")
        .arg(repo)
        .arg(version)
        .arg(fallback)
        .arg(format)
        .arg(output)
}
