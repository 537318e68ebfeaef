//! Generators for the animation tables, web assets, glyph tables and build
//! definitions of the mcompass firmware.

use anyhow::Result;

use crate::{
    action::{build_flags::build_flags, compress::compress, elastic::elastic, font::font},
    cli::Action,
};

pub mod action;
pub mod cli;
pub mod common;
pub mod logger;

fn main() -> Result<()> {
    let invocation = cli::get_invocation();
    logger::init(invocation.log_level);

    match invocation.action {
        Action::Elastic(config) => elastic(config)?,
        Action::Compress(config) => compress(config)?,
        Action::Font(config) => font(config)?,
        Action::BuildFlags(config) => build_flags(config)?,
    }

    Ok(())
}
