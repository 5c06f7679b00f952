//! Interactive brand → model → year selection.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use std::sync::Arc;
use std::time::Duration;

use cromaticar_core::{render_state, CascadingFilter, CatalogSource, SearchController};

use super::search;
use crate::output;

#[derive(Args)]
pub struct BrowseArgs {
    /// Free-text query applied on top of the selection
    #[arg(short, long)]
    pub query: Option<String>,
}

pub async fn execute(args: BrowseArgs, source: Arc<dyn CatalogSource>, timeout: Duration) -> Result<()> {
    let mut filter = CascadingFilter::new();
    filter
        .load_brands(source.as_ref())
        .await
        .context("Failed to load brands")?;

    if filter.brand_options().is_empty() {
        println!("{}", "The catalog has no brands.".yellow());
        return Ok(());
    }

    let controller = SearchController::new(Arc::clone(&source)).with_timeout(timeout);

    loop {
        pick_brand(&mut filter, source.as_ref()).await?;
        pick_model(&mut filter)?;
        pick_year(&mut filter)?;

        let mut filters = filter.to_filters();
        filters.query = args.query.clone().filter(|q| !q.trim().is_empty());

        search::run(&controller, filters, true).await;
        println!();
        output::print_view(&render_state(&controller.state()));
        println!();

        let again = Confirm::new()
            .with_prompt("Refine the selection?")
            .default(false)
            .interact()?;
        if !again {
            break;
        }
    }

    Ok(())
}

async fn pick_brand(filter: &mut CascadingFilter, source: &dyn CatalogSource) -> Result<()> {
    let mut items = vec!["Any brand".to_string()];
    items.extend(filter.brand_options().iter().map(|b| b.name.clone()));

    let current = filter
        .brand()
        .and_then(|selected| filter.brand_options().iter().position(|b| b.id == selected.id))
        .map_or(0, |i| i + 1);

    let choice = Select::new()
        .with_prompt("Brand")
        .items(&items)
        .default(current)
        .interact()?;

    if choice == 0 {
        filter.clear_brand();
        return Ok(());
    }

    let brand_id = filter.brand_options()[choice - 1].id.clone();
    if let Err(e) = filter.select_brand(&brand_id, source).await {
        println!("{} {}", "!".yellow().bold(), e.user_message());
    }
    Ok(())
}

fn pick_model(filter: &mut CascadingFilter) -> Result<()> {
    if filter.brand().is_none() || filter.model_options().is_empty() {
        return Ok(());
    }

    let mut items = vec!["Any model".to_string()];
    items.extend(filter.model_options().iter().map(|m| m.name.clone()));

    let current = filter
        .model()
        .and_then(|selected| filter.model_options().iter().position(|m| m.id == selected.id))
        .map_or(0, |i| i + 1);

    let choice = Select::new()
        .with_prompt("Model")
        .items(&items)
        .default(current)
        .interact()?;

    if choice == 0 {
        filter.clear_model();
    } else {
        let model_id = filter.model_options()[choice - 1].id.clone();
        filter.select_model(&model_id)?;
    }
    Ok(())
}

fn pick_year(filter: &mut CascadingFilter) -> Result<()> {
    let initial = filter.year().map(|y| y.to_string()).unwrap_or_default();

    let input: String = Input::new()
        .with_prompt("Year (blank for any)")
        .with_initial_text(initial)
        .allow_empty(true)
        .validate_with(|value: &String| -> Result<(), &str> {
            let value = value.trim();
            if value.is_empty() || value.parse::<i32>().is_ok() {
                Ok(())
            } else {
                Err("enter a year like 2022")
            }
        })
        .interact_text()?;

    let year = input.trim();
    filter.select_year(if year.is_empty() { None } else { year.parse().ok() });
    Ok(())
}
