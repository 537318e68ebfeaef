//! Helper function to emit the firmware build definitions given a [`BuildFlagsConfig`].

use anyhow::Result;
use mcompass_assets::build_flags::{collect_defines, BuildEnv, GitInfo, Settings};

use crate::{action::write_output, cli::build_flags::BuildFlagsConfig, common::FlagsFormat};

/// Collects git metadata and the `DEFAULT_*` environment settings and writes
/// them out as preprocessor definitions.
///
/// # Errors
///
/// Returns errors if the definitions cannot be written.
pub fn build_flags(config: BuildFlagsConfig) -> Result<()> {
    let git = GitInfo::query(&config.repo);
    let settings = Settings::from_env(&config.fallback.defaults());
    log::debug!("git {:?}, settings {:?}", git, settings);

    let mut env = BuildEnv::new();
    env.append(collect_defines(&git, &settings, &config.version));

    let text = match config.format {
        FlagsFormat::Flags => env.to_flags(),
        FlagsFormat::Header => env.to_header(),
    };
    write_output(config.output.as_deref(), &text)
}
