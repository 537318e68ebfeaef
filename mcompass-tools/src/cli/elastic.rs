//! Command line parsing and [`Action::Elastic`][ac] construction.
//!
//! [ac]: crate::cli::Action::Elastic

use std::path::PathBuf;

use clap::{builder::EnumValueParser, value_parser, Arg, ArgAction, ArgMatches, Command};
use mcompass_assets::elastic::{Segment, DEFAULT_K, DEFAULT_SEGMENTS};

use crate::common::TableFormat;

/// Description of an elastic animation table.
#[derive(Clone, Debug, PartialEq)]
pub struct ElasticConfig {
    /// The curve pieces, in output order.
    pub segments: Vec<Segment>,
    /// The decay rate of every segment.
    pub k: f64,
    /// The [`TableFormat`] of the output.
    pub format: TableFormat,
    /// The name of the array for [`TableFormat::Array`].
    pub name: String,
    /// Where to write the table. Standard output if [`None`].
    pub output: Option<PathBuf>,
}

/// Parses the arguments required to produce a valid [`ElasticConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> ElasticConfig {
    let segments = matches
        .get_many::<Segment>("segment")
        .map(|segments| segments.copied().collect())
        .unwrap_or_else(|| DEFAULT_SEGMENTS.to_vec());
    let k = matches
        .get_one::<f64>("k")
        .copied()
        .unwrap_or(DEFAULT_K);
    let format = matches
        .get_one::<TableFormat>("format")
        .copied()
        .unwrap_or_default();
    let name = matches
        .get_one::<String>("name")
        .cloned()
        .unwrap_or_else(|| unreachable!("`name` has a default value"));
    let output = matches.get_one::<PathBuf>("output").cloned();

    ElasticConfig {
        segments,
        k,
        format,
        name,
        output,
    }
}

/// Returns the command parser for an [`Action::Elastic`][ac].
///
/// [ac]: crate::cli::Action::Elastic
pub fn subcommand_parser() -> Command {
    let segment = Arg::new("segment")
        .long("segment")
        .help("Curve piece as rise|fall:START:END:STEPS, repeatable")
        .value_parser(value_parser!(Segment))
        .action(ArgAction::Append);

    let k = Arg::new("k")
        .short('k')
        .help("Decay rate, 0.1 if omitted")
        .value_parser(value_parser!(f64));

    let format = Arg::new("format")
        .long("format")
        .value_parser(EnumValueParser::<TableFormat>::new());

    let name = Arg::new("name")
        .long("name")
        .help("Array name for --format array")
        .default_value("ELASTIC");

    let output = Arg::new("output")
        .long("output")
        .short('o')
        .value_parser(value_parser!(PathBuf));

    Command::new("elastic")
        .about("Print an exponential rise/fall animation table")
        .arg(segment)
        .arg(k)
        .arg(format)
        .arg(name)
        .arg(output)
}
