//! Search filter, request and controller-state models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ColorRecord;

/// A brand or model filter value.
///
/// Users type names, pickers hand over numeric foreign keys; both are valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    Id(i64),
    Name(String),
}

impl FilterValue {
    /// Read user input: blank is no filter, all digits is a foreign key,
    /// anything else is a name.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if input.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(id) = input.parse() {
                return Some(Self::Id(id));
            }
        }
        Some(Self::Name(input.to_string()))
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{}", id),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// User-facing search filters. All fields optional; empty means browse all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub brand: Option<FilterValue>,
    pub model: Option<FilterValue>,
    pub year: Option<i32>,
}

impl SearchFilters {
    /// Set the free-text query. Blank input clears it.
    pub fn query(mut self, query: &str) -> Self {
        let query = query.trim();
        self.query = (!query.is_empty()).then(|| query.to_string());
        self
    }

    /// Set the brand from a name or numeric id.
    pub fn brand(mut self, brand: &str) -> Self {
        self.brand = FilterValue::parse(brand);
        self
    }

    /// Set the model from a name or numeric id.
    pub fn model(mut self, model: &str) -> Self {
        self.model = FilterValue::parse(model);
        self
    }

    /// Set the model year.
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.brand.is_none() && self.model.is_none() && self.year.is_none()
    }
}

/// Canonical request shape sent to `GET /colors/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub q: Option<String>,
    pub brand_id: Option<i64>,
    pub brand_name: Option<String>,
    pub model_id: Option<i64>,
    pub model_name: Option<String>,
    pub year: Option<i32>,
}

impl SearchRequest {
    /// Build the canonical request for a set of filters.
    pub fn from_filters(filters: &SearchFilters) -> Self {
        crate::normalize::normalize_filters(filters)
    }

    /// Query-string pairs using the API's parameter names, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(id) = self.brand_id {
            pairs.push(("id_montadora", id.to_string()));
        }
        if let Some(name) = &self.brand_name {
            pairs.push(("montadora", name.clone()));
        }
        if let Some(id) = self.model_id {
            pairs.push(("id_modelo", id.to_string()));
        }
        if let Some(name) = &self.model_name {
            pairs.push(("modelo", name.clone()));
        }
        if let Some(year) = self.year {
            pairs.push(("ano", year.to_string()));
        }
        pairs
    }

    /// Whether this request asks for the whole catalog.
    pub fn is_browse_all(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// Controller status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Idle,
    Loading,
    Error,
    Ready,
}

impl SearchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Error => "error",
            Self::Ready => "ready",
        }
    }
}

/// Snapshot of everything the controller exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub filters: SearchFilters,
    pub results: Vec<ColorRecord>,
    pub status: SearchStatus,
    pub error_message: Option<String>,
    /// Set once any search has been started since the last clear.
    pub searched: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            filters: SearchFilters::default(),
            results: Vec::new(),
            status: SearchStatus::Idle,
            error_message: None,
            searched: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_value_parse() {
        assert_eq!(FilterValue::parse("  "), None);
        assert_eq!(FilterValue::parse("42"), Some(FilterValue::Id(42)));
        assert_eq!(FilterValue::parse(" Ford "), Some(FilterValue::Name("Ford".to_string())));
        assert_eq!(FilterValue::parse("HR-V"), Some(FilterValue::Name("HR-V".to_string())));
        assert_eq!(
            FilterValue::parse("99999999999999999999"),
            Some(FilterValue::Name("99999999999999999999".to_string()))
        );
    }

    #[test]
    fn test_filters_builder() {
        let filters = SearchFilters::default().brand("Ford").year(2099).query("  ");
        assert_eq!(filters.brand, Some(FilterValue::Name("Ford".to_string())));
        assert_eq!(filters.year, Some(2099));
        assert_eq!(filters.query, None);
        assert!(!filters.is_empty());
        assert!(SearchFilters::default().is_empty());
    }

    #[test]
    fn test_query_pairs_order() {
        let request = SearchRequest {
            q: Some("prata".to_string()),
            brand_id: Some(2),
            model_name: Some("Ranger".to_string()),
            year: Some(2021),
            ..Default::default()
        };
        assert_eq!(
            request.query_pairs(),
            vec![
                ("q", "prata".to_string()),
                ("id_montadora", "2".to_string()),
                ("modelo", "Ranger".to_string()),
                ("ano", "2021".to_string()),
            ]
        );
        assert!(SearchRequest::default().is_browse_all());
    }
}
