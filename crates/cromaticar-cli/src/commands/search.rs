//! Color search command.

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use cromaticar_core::{
    render_state, CatalogSource, FilterValue, SearchController, SearchFilters, SearchOutcome,
};

use crate::output;

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query (color name or paint code)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Brand name or id
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Model name or id
    #[arg(short, long)]
    pub model: Option<String>,

    /// Model year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Print the rendered view as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    fn filters(&self) -> SearchFilters {
        SearchFilters {
            query: self.query.clone().filter(|q| !q.trim().is_empty()),
            brand: self.brand.as_deref().and_then(FilterValue::parse),
            model: self.model.as_deref().and_then(FilterValue::parse),
            year: self.year,
        }
    }
}

pub async fn execute(args: SearchArgs, source: Arc<dyn CatalogSource>, timeout: Duration) -> Result<()> {
    let controller = SearchController::new(source).with_timeout(timeout);
    let outcome = run(&controller, args.filters(), !args.json).await;

    let state = controller.state();
    let view = render_state(&state);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to encode results")?
        );
    } else {
        output::print_view(&view);
    }

    if let SearchOutcome::Failed = outcome {
        anyhow::bail!("Search failed");
    }
    Ok(())
}

/// Run one search, showing a spinner while the controller is loading.
pub async fn run(
    controller: &SearchController<dyn CatalogSource>,
    filters: SearchFilters,
    show_spinner: bool,
) -> SearchOutcome {
    let spinner = show_spinner.then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Searching colors...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    });

    let outcome = controller.search(filters).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_flags_become_ids() {
        let args = SearchArgs {
            query: Some("  ".to_string()),
            brand: Some("2".to_string()),
            model: Some("Ranger".to_string()),
            year: Some(2022),
            json: false,
        };

        let filters = args.filters();
        assert_eq!(filters.query, None);
        assert_eq!(filters.brand, Some(FilterValue::Id(2)));
        assert_eq!(filters.model, Some(FilterValue::Name("Ranger".to_string())));
        assert_eq!(filters.year, Some(2022));
    }
}
