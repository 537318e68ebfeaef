//! Command line parsing and [`Action`] construction.

use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;

use crate::cli::{
    build_flags::BuildFlagsConfig, compress::CompressConfig, elastic::ElasticConfig,
    font::FontConfig,
};

pub mod build_flags;
pub mod compress;
pub mod elastic;
pub mod font;

/// The action to carry out.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Print an elastic animation table.
    Elastic(ElasticConfig),
    /// Gzip the web interface assets.
    Compress(CompressConfig),
    /// Rasterize a font into a glyph table.
    Font(FontConfig),
    /// Emit the firmware build definitions.
    BuildFlags(BuildFlagsConfig),
}

/// An [`Action`] together with the options common to all of them.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    /// The most verbose log level that is shown.
    pub log_level: LevelFilter,
    /// The [`Action`] to carry out.
    pub action: Action,
}

/// Parses `mcompass-tools`'s arguments to construct an [`Invocation`].
pub fn get_invocation() -> Invocation {
    parse_invocation(command_parser().get_matches())
}

fn parse_invocation(matches: clap::ArgMatches) -> Invocation {
    let log_level = matches
        .get_one::<LevelFilter>("log-level")
        .copied()
        .unwrap_or_else(|| unreachable!("`log-level` has a default value"));

    let Some((subcommand_name, subcommand_matches)) = matches.subcommand() else {
        unreachable!("subcommand is required");
    };
    let action = match subcommand_name {
        "elastic" => Action::Elastic(elastic::parse_arguments(subcommand_matches)),
        "compress" => Action::Compress(compress::parse_arguments(subcommand_matches)),
        "font" => Action::Font(font::parse_arguments(subcommand_matches)),
        "build-flags" => Action::BuildFlags(build_flags::parse_arguments(subcommand_matches)),
        _ => unreachable!("unexpected subcommand: {subcommand_name:?}"),
    };

    Invocation { log_level, action }
}

/// Returns the command parser for all [`Action`]s.
fn command_parser() -> Command {
    let log_level = Arg::new("log-level")
        .long("log-level")
        .env("MCOMPASS_LOG")
        .value_parser(value_parser!(LevelFilter))
        .default_value("info")
        .action(ArgAction::Set)
        .global(true);

    Command::new("mcompass-tools")
        .about("Asset and build definition generators for the mcompass firmware")
        .arg(log_level)
        .subcommand(elastic::subcommand_parser())
        .subcommand(compress::subcommand_parser())
        .subcommand(font::subcommand_parser())
        .subcommand(build_flags::subcommand_parser())
        .subcommand_required(true)
        .arg_required_else_help(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use mcompass_assets::{build_flags::FIRMWARE_VERSION, elastic, font};

    use crate::common::{FlagsFormat, Revision, TableFormat};

    fn parse(args: &[&str]) -> Invocation {
        let args = std::iter::once("mcompass-tools").chain(args.iter().copied());
        parse_invocation(command_parser().try_get_matches_from(args).unwrap())
    }

    #[test]
    fn command_is_consistent() {
        command_parser().debug_assert();
    }

    #[test]
    fn elastic_defaults() {
        let invocation = parse(&["elastic"]);
        assert_eq!(invocation.log_level, LevelFilter::Info);
        assert_eq!(
            invocation.action,
            Action::Elastic(ElasticConfig {
                segments: elastic::DEFAULT_SEGMENTS.to_vec(),
                k: elastic::DEFAULT_K,
                format: TableFormat::Entries,
                name: "ELASTIC".to_string(),
                output: None,
            })
        );
    }

    #[test]
    fn elastic_segments() {
        let invocation = parse(&[
            "elastic",
            "--segment",
            "rise:0:90:10",
            "--segment",
            "fall:90:45:5",
            "-k",
            "0.5",
            "--format",
            "array",
        ]);
        let Action::Elastic(config) = invocation.action else {
            panic!("unexpected action: {:?}", invocation.action);
        };
        assert_eq!(config.segments.len(), 2);
        assert_eq!(config.segments[1], "fall:90:45:5".parse::<elastic::Segment>().unwrap());
        assert_eq!(config.k, 0.5);
        assert_eq!(config.format, TableFormat::Array);
    }

    #[test]
    fn rejects_bad_segment() {
        let args = ["mcompass-tools", "elastic", "--segment", "up:0:1:2"];
        assert!(command_parser().try_get_matches_from(args).is_err());
    }

    #[test]
    fn compress_defaults() {
        let invocation = parse(&["--log-level", "warn", "compress"]);
        assert_eq!(invocation.log_level, LevelFilter::Warn);
        assert_eq!(
            invocation.action,
            Action::Compress(CompressConfig {
                folder: PathBuf::from("./data/_next"),
            })
        );
    }

    #[test]
    fn font_defaults() {
        let invocation = parse(&["font"]);
        assert_eq!(
            invocation.action,
            Action::Font(FontConfig {
                font: PathBuf::from(font::DEFAULT_FONT_PATH),
                chars: font::DEFAULT_CHARS.to_string(),
                size: font::DEFAULT_FONT_SIZE,
                format: TableFormat::Entries,
                name: "FONT_3X5".to_string(),
                output: None,
            })
        );
    }

    #[test]
    fn build_flags_options() {
        let invocation = parse(&[
            "build-flags",
            "--fallback",
            "gps",
            "--format",
            "header",
            "--output",
            "include/build_info.h",
        ]);
        assert_eq!(
            invocation.action,
            Action::BuildFlags(BuildFlagsConfig {
                repo: PathBuf::from("."),
                version: FIRMWARE_VERSION.to_string(),
                fallback: Revision::Gps,
                format: FlagsFormat::Header,
                output: Some(PathBuf::from("include/build_info.h")),
            })
        );
    }
}
