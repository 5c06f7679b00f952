//! Retailer search for a color.

use anyhow::{Context, Result};
use clap::Args;

use cromaticar_core::{find_stores, resolve_detail, CatalogSource, UserLocation};

use crate::output;

#[derive(Args)]
pub struct StoresArgs {
    /// Color id to look for
    pub color: String,

    /// Vehicle brand, when the color record does not carry one
    #[arg(long)]
    pub brand: Option<String>,

    /// Vehicle model, when the color record does not carry one
    #[arg(long)]
    pub model: Option<String>,

    /// Vehicle year, when the color record does not carry one
    #[arg(long)]
    pub year: Option<i32>,

    /// Postal code (CEP) to search around
    #[arg(long)]
    pub cep: Option<String>,

    /// Latitude of the search position
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the search position
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
}

impl StoresArgs {
    fn location(&self) -> UserLocation {
        UserLocation {
            cep: self.cep.clone(),
            coordinates: self.lat.zip(self.lng),
        }
    }
}

pub async fn execute(args: StoresArgs, source: &dyn CatalogSource) -> Result<()> {
    let mut color = resolve_detail(source, args.color.as_str())
        .await
        .context("Failed to load color")?;

    // Explicit vehicle flags win over what the record says.
    if let Some(brand) = &args.brand {
        color.brand_name = Some(brand.clone());
    }
    if let Some(model) = &args.model {
        color.model_name = Some(model.clone());
    }
    if let Some(year) = args.year {
        color.model_year = Some(year);
    }

    let stores = find_stores(source, &color, &args.location())
        .await
        .context("Store search failed")?;

    output::print_stores(&color.display_name, &stores);
    Ok(())
}
