//! Helper function to generate a glyph table given a [`FontConfig`].

use anyhow::{Context, Result};
use mcompass_assets::font::Font;

use crate::{action::write_output, cli::font::FontConfig, common::TableFormat};

/// Rasterizes the configured characters and writes the table out.
///
/// # Errors
///
/// Returns errors if the font cannot be loaded, a character cannot be
/// rendered, or the table cannot be written.
pub fn font(config: FontConfig) -> Result<()> {
    let mut font = Font::load(&config.font)
        .with_context(|| format!("error loading font \"{}\"", config.font.display()))?;
    let font_mod = font.generate_font_mod(&config.chars, config.size)?;
    log::debug!("rendered {} glyphs", font_mod.glyphs.len());

    let text = match config.format {
        TableFormat::Entries => font_mod.to_c_source(),
        TableFormat::Array => font_mod.to_c_array(&config.name),
    };
    write_output(config.output.as_deref(), &text)
}
