//! Brand, model, year and popular color listings.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use cromaticar_core::normalize::{normalize_all, normalize_brand, normalize_color, normalize_model, normalize_year};
use cromaticar_core::{render, BrandRecord, CatalogSource};

use crate::output;

#[derive(Args)]
pub struct BrandsArgs {
    /// Only brands matching this text
    #[arg(short, long)]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct BrandArg {
    /// Brand name or id
    pub brand: String,
}

pub async fn list(args: BrandsArgs, source: &dyn CatalogSource) -> Result<()> {
    let raws = match args.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => source.search_brands(query).await,
        None => source.list_brands().await,
    }
    .context("Failed to load brands")?;

    let brands = normalize_all(&raws, normalize_brand);
    warn_rejected("brand", &brands.rejected);
    output::print_brands(&brands.records);
    Ok(())
}

pub async fn show(args: BrandArg, source: &dyn CatalogSource) -> Result<()> {
    let listed = find_brand(&args.brand, source).await?;
    let raw = source
        .get_brand(&listed.id)
        .await
        .with_context(|| format!("Failed to load brand {}", listed.name))?;
    let brand = normalize_brand(&raw).context("Brand record is unreadable")?;

    let raws = source
        .brand_colors(&brand.id)
        .await
        .with_context(|| format!("Failed to load colors for {}", brand.name))?;
    let colors = normalize_all(&raws, normalize_color);
    warn_rejected("color", &colors.rejected);

    output::print_brand(&brand);
    println!();
    output::print_view(&render(&colors.records, false, None, true));
    Ok(())
}

pub async fn models(args: BrandArg, source: &dyn CatalogSource) -> Result<()> {
    let brand = find_brand(&args.brand, source).await?;
    let raws = source
        .list_models(&brand.id)
        .await
        .with_context(|| format!("Failed to load models for {}", brand.name))?;

    let models = normalize_all(&raws, normalize_model);
    warn_rejected("model", &models.rejected);
    output::print_models(&brand.name, &models.records);
    Ok(())
}

pub async fn years(args: BrandArg, source: &dyn CatalogSource) -> Result<()> {
    let brand = find_brand(&args.brand, source).await?;
    let raws = source
        .list_years(&brand.id)
        .await
        .with_context(|| format!("Failed to load years for {}", brand.name))?;

    let years = normalize_all(&raws, normalize_year);
    warn_rejected("year", &years.rejected);
    output::print_years(&brand.name, &years.records);
    Ok(())
}

pub async fn all_colors(source: &dyn CatalogSource) -> Result<()> {
    let raws = source.list_colors().await.context("Failed to load colors")?;

    let colors = normalize_all(&raws, normalize_color);
    warn_rejected("color", &colors.rejected);
    output::print_view(&render(&colors.records, false, None, true));
    Ok(())
}

pub async fn popular(source: &dyn CatalogSource) -> Result<()> {
    let raws = source
        .popular_colors()
        .await
        .context("Failed to load popular colors")?;

    let colors = normalize_all(&raws, normalize_color);
    warn_rejected("color", &colors.rejected);

    println!("{}", "Popular colors".bold());
    output::print_view(&render(&colors.records, false, None, true));
    Ok(())
}

/// Look a brand up by id or name in the brand list.
async fn find_brand(value: &str, source: &dyn CatalogSource) -> Result<BrandRecord> {
    let raws = source.list_brands().await.context("Failed to load brands")?;
    let brands = normalize_all(&raws, normalize_brand);

    brands
        .records
        .into_iter()
        .find(|b| b.matches(value))
        .ok_or_else(|| anyhow::anyhow!("Unknown brand '{}'. Run 'cromaticar brands' to list them.", value))
}

fn warn_rejected(kind: &str, rejected: &[(usize, cromaticar_core::CatalogError)]) {
    for (index, reason) in rejected {
        tracing::warn!(kind, index, error = %reason, "Skipping record that failed normalization");
    }
}
