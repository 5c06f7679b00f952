//! Color detail command.

use anyhow::{Context, Result};
use clap::Args;

use cromaticar_core::{resolve_detail, CatalogSource};

use crate::output;

#[derive(Args)]
pub struct ColorArgs {
    /// Color id; when several are given the first one is shown
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: ColorArgs, source: &dyn CatalogSource) -> Result<()> {
    let color = resolve_detail(source, args.ids)
        .await
        .context("Failed to load color")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&color).context("Failed to encode color")?
        );
    } else {
        output::print_color(&color);
    }
    Ok(())
}
