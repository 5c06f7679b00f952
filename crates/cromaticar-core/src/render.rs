//! Result rendering.
//!
//! Maps search state to exactly one display state. Pure; no I/O.

use serde::Serialize;

use crate::model::ColorRecord;
use crate::search::model::{SearchState, SearchStatus};

/// One display card in the populated grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorCard<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub swatch: &'a str,
    pub code: Option<&'a str>,
    pub vehicle: Option<String>,
    pub category: Option<&'a str>,
}

impl<'a> ColorCard<'a> {
    fn from_record(record: &'a ColorRecord) -> Self {
        Self {
            id: &record.id,
            title: &record.display_name,
            swatch: &record.hex_code,
            code: record.color_code.as_deref(),
            vehicle: record.vehicle_label(),
            category: record.category.as_deref(),
        }
    }
}

/// What the results area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ResultView<'a> {
    /// Nothing searched yet; prompt the user to pick filters.
    Idle,
    Loading,
    Error(&'a str),
    /// A search ran and matched nothing.
    Empty,
    /// Cards in the order the search returned them.
    Populated(Vec<ColorCard<'a>>),
}

impl ResultView<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Empty => "empty",
            Self::Populated(_) => "populated",
        }
    }
}

/// Pick the display state.
///
/// Precedence: loading, then error, then empty-after-search, then idle,
/// then the populated grid.
pub fn render<'a>(
    results: &'a [ColorRecord],
    loading: bool,
    error: Option<&'a str>,
    searched: bool,
) -> ResultView<'a> {
    if loading {
        return ResultView::Loading;
    }
    if let Some(message) = error {
        return ResultView::Error(message);
    }
    if results.is_empty() {
        return if searched { ResultView::Empty } else { ResultView::Idle };
    }
    ResultView::Populated(results.iter().map(ColorCard::from_record).collect())
}

/// Render a controller snapshot.
pub fn render_state(state: &SearchState) -> ResultView<'_> {
    let error = match state.status {
        SearchStatus::Error => Some(state.error_message.as_deref().unwrap_or("Search failed")),
        _ => None,
    };

    render(
        &state.results,
        state.status == SearchStatus::Loading,
        error,
        state.searched,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> ColorRecord {
        ColorRecord {
            id: id.to_string(),
            display_name: name.to_string(),
            hex_code: "#000000".to_string(),
            rgb_triple: None,
            color_code: Some("X1".to_string()),
            brand_name: Some("Fiat".to_string()),
            model_name: Some("Argo".to_string()),
            model_year: Some(2021),
            category: None,
        }
    }

    #[test]
    fn test_loading_wins_over_everything() {
        let results = vec![record("1", "Preto")];
        assert_eq!(render(&results, true, Some("boom"), true), ResultView::Loading);
    }

    #[test]
    fn test_error_hides_results() {
        let results = vec![record("1", "Preto")];
        assert_eq!(render(&results, false, Some("boom"), true), ResultView::Error("boom"));
    }

    #[test]
    fn test_empty_versus_idle() {
        assert_eq!(render(&[], false, None, true), ResultView::Empty);
        assert_eq!(render(&[], false, None, false), ResultView::Idle);
    }

    #[test]
    fn test_populated_keeps_order() {
        let results = vec![record("9", "Zinco"), record("1", "Azul"), record("5", "Marrom")];
        let view = render(&results, false, None, true);
        let ResultView::Populated(cards) = &view else {
            panic!("expected populated view, got {}", view.name());
        };
        let ids: Vec<&str> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["9", "1", "5"]);
        assert_eq!(cards[0].vehicle.as_deref(), Some("Fiat Argo 2021"));
    }

    #[test]
    fn test_render_state_error_without_message() {
        let state = SearchState {
            status: SearchStatus::Error,
            searched: true,
            ..Default::default()
        };
        assert_eq!(render_state(&state), ResultView::Error("Search failed"));
    }
}
