//! Helper function to print an elastic animation table given an [`ElasticConfig`].

use anyhow::Result;
use mcompass_assets::elastic;

use crate::{action::write_output, cli::elastic::ElasticConfig, common::TableFormat};

/// Computes the table described by `config` and writes it out.
///
/// # Errors
///
/// Returns errors if the table cannot be written.
pub fn elastic(config: ElasticConfig) -> Result<()> {
    let values = elastic::sequence(&config.segments, config.k);
    log::debug!(
        "{} values from {} segments",
        values.len(),
        config.segments.len()
    );

    let text = match config.format {
        TableFormat::Entries => elastic::format_steps(&values),
        TableFormat::Array => elastic::format_array(&config.name, &values),
    };
    write_output(config.output.as_deref(), &text)
}
