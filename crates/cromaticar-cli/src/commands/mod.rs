//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cromaticar_client::{CatalogClient, ClientConfig};
use cromaticar_core::{CatalogSource, StaticCatalog};

pub mod brands;
pub mod browse;
pub mod color;
pub mod config;
pub mod search;
pub mod stores;

/// Cromaticar - automotive paint color catalog
#[derive(Parser)]
#[command(name = "cromaticar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to <config dir>/cromaticar/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Use the bundled sample catalog instead of the API
    #[arg(long, global = true)]
    pub offline: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search colors by text, brand, model and year
    Search(search::SearchArgs),

    /// Show one color in detail
    Color(color::ColorArgs),

    /// List every color in the catalog
    Colors,

    /// List or search brands
    Brands(brands::BrandsArgs),

    /// Show a brand and its colors
    Brand(brands::BrandArg),

    /// List the models of a brand
    Models(brands::BrandArg),

    /// List the years a brand has colors for
    Years(brands::BrandArg),

    /// Show popular colors
    Popular,

    /// Find paint retailers for a color
    Stores(stores::StoresArgs),

    /// Pick brand, model and year interactively, then search
    Browse(browse::BrowseArgs),

    /// Print the effective configuration
    Config,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let settings = config::resolve(self.config.as_deref(), self.api_url.as_deref())?;

        if let Commands::Config = self.command {
            return config::execute(&settings, self.offline);
        }

        let (source, timeout) = open_source(&settings, self.offline)?;

        match self.command {
            Commands::Search(args) => search::execute(args, source, timeout).await,
            Commands::Color(args) => color::execute(args, source.as_ref()).await,
            Commands::Colors => brands::all_colors(source.as_ref()).await,
            Commands::Brands(args) => brands::list(args, source.as_ref()).await,
            Commands::Brand(args) => brands::show(args, source.as_ref()).await,
            Commands::Models(args) => brands::models(args, source.as_ref()).await,
            Commands::Years(args) => brands::years(args, source.as_ref()).await,
            Commands::Popular => brands::popular(source.as_ref()).await,
            Commands::Stores(args) => stores::execute(args, source.as_ref()).await,
            Commands::Browse(args) => browse::execute(args, source, timeout).await,
            Commands::Config => Ok(()),
        }
    }
}

/// Build the data source the commands talk to.
fn open_source(settings: &ClientConfig, offline: bool) -> Result<(Arc<dyn CatalogSource>, Duration)> {
    if offline {
        tracing::debug!("Using the bundled sample catalog");
        return Ok((Arc::new(StaticCatalog::sample()), settings.timeout()));
    }

    let client = CatalogClient::new(settings).context("Failed to create catalog client")?;
    tracing::debug!(base_url = client.base_url(), "Using catalog API");
    Ok((Arc::new(client), settings.timeout()))
}
