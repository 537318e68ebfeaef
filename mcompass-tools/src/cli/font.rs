//! Command line parsing and [`Action::Font`][ac] construction.
//!
//! [ac]: crate::cli::Action::Font

use std::path::PathBuf;

use clap::{builder::EnumValueParser, value_parser, Arg, ArgMatches, Command};
use mcompass_assets::font::{DEFAULT_CHARS, DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE};

use crate::common::TableFormat;

/// Description of a glyph table.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FontConfig {
    /// The TrueType font to rasterize.
    pub font: PathBuf,
    /// The characters to include, in output order.
    pub chars: String,
    /// The pixel size the font is rendered at.
    pub size: u32,
    /// The [`TableFormat`] of the output.
    pub format: TableFormat,
    /// The name of the array for [`TableFormat::Array`].
    pub name: String,
    /// Where to write the table. Standard output if [`None`].
    pub output: Option<PathBuf>,
}

/// Parses the arguments required to produce a valid [`FontConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> FontConfig {
    let font = matches
        .get_one::<PathBuf>("font")
        .cloned()
        .unwrap_or_else(|| unreachable!("`font` has a default value"));
    let chars = matches
        .get_one::<String>("chars")
        .cloned()
        .unwrap_or_else(|| unreachable!("`chars` has a default value"));
    let size = matches
        .get_one::<u32>("size")
        .copied()
        .unwrap_or(DEFAULT_FONT_SIZE);
    let format = matches
        .get_one::<TableFormat>("format")
        .copied()
        .unwrap_or_default();
    let name = matches
        .get_one::<String>("name")
        .cloned()
        .unwrap_or_else(|| unreachable!("`name` has a default value"));
    let output = matches.get_one::<PathBuf>("output").cloned();

    FontConfig {
        font,
        chars,
        size,
        format,
        name,
        output,
    }
}

/// Returns the command parser for an [`Action::Font`][ac].
///
/// [ac]: crate::cli::Action::Font
pub fn subcommand_parser() -> Command {
    let font = Arg::new("font")
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_FONT_PATH);

    let chars = Arg::new("chars")
        .long("chars")
        .default_value(DEFAULT_CHARS);

    let size = Arg::new("size")
        .long("size")
        .value_parser(value_parser!(u32).range(1..));

    let format = Arg::new("format")
        .long("format")
        .value_parser(EnumValueParser::<TableFormat>::new());

    let name = Arg::new("name")
        .long("name")
        .help("Array name for --format array")
        .default_value("FONT_3X5");

    let output = Arg::new("output")
        .long("output")
        .short('o')
        .value_parser(value_parser!(PathBuf));

    Command::new("font")
        .about("Rasterize characters of a TrueType font into a 3x5 glyph table")
        .arg(font)
        .arg(chars)
        .arg(size)
        .arg(format)
        .arg(name)
        .arg(output)
}
