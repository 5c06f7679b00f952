//! Data-access seam between the search flow and the catalog collaborator.
//!
//! The controller, filter and detail resolver only ever talk to a
//! [`CatalogSource`]. The HTTP client and the in-memory [`crate::StaticCatalog`]
//! both implement it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CatalogResult;
use crate::search::model::SearchRequest;
use crate::store::model::{StoreResult, StoreSearchRequest};

/// An externally-sourced JSON object, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Map<String, Value>);

impl RawRecord {
    /// Wrap a JSON value, returning `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Return the first non-blank scalar found under `keys`, as a string.
    ///
    /// Keys are tried in order. Numbers are rendered without decoration so a
    /// numeric foreign key `7` and the string `"7"` read the same.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| match self.0.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Return the first value under `keys` that reads as an integer.
    ///
    /// A present but non-numeric value is skipped, not treated as an error.
    pub fn integer(&self, keys: &[&str]) -> Option<i64> {
        keys.iter().find_map(|key| match self.0.get(*key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Return the first array found under `keys`.
    pub fn list(&self, keys: &[&str]) -> Option<&Vec<Value>> {
        keys.iter().find_map(|key| self.0.get(*key)?.as_array())
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Remote catalog operations.
///
/// Implementations return raw records; turning them into canonical entities
/// is the caller's job.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// `GET /colors/search`
    async fn search_colors(&self, request: &SearchRequest) -> CatalogResult<Vec<RawRecord>>;

    /// `GET /colors/{id}`. Must fail with `NotFound` when there is no match.
    async fn get_color(&self, id: &str) -> CatalogResult<RawRecord>;

    /// `GET /colors`
    async fn list_colors(&self) -> CatalogResult<Vec<RawRecord>>;

    /// `GET /colors/popular`
    async fn popular_colors(&self) -> CatalogResult<Vec<RawRecord>>;

    /// `GET /brands`
    async fn list_brands(&self) -> CatalogResult<Vec<RawRecord>>;

    /// `GET /brands/search?q=`
    async fn search_brands(&self, query: &str) -> CatalogResult<Vec<RawRecord>>;

    /// `GET /brands/{id}`. Must fail with `NotFound` when there is no match.
    async fn get_brand(&self, brand_id: &str) -> CatalogResult<RawRecord>;

    /// `GET /brands/{id}/colors`
    async fn brand_colors(&self, brand_id: &str) -> CatalogResult<Vec<RawRecord>>;

    /// `GET /brands/{id}/models`
    async fn list_models(&self, brand_id: &str) -> CatalogResult<Vec<RawRecord>>;

    /// `GET /brands/{id}/years`
    async fn list_years(&self, brand_id: &str) -> CatalogResult<Vec<RawRecord>>;

    /// `POST /automotive-search/search-stores`
    async fn search_stores(&self, request: &StoreSearchRequest) -> CatalogResult<Vec<StoreResult>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        RawRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_text_reads_numbers_and_skips_blanks() {
        let record = raw(json!({ "id": "  ", "id_cor": 42 }));
        assert_eq!(record.text(&["id", "id_cor"]), Some("42".to_string()));
        assert_eq!(record.text(&["nome"]), None);
    }

    #[test]
    fn test_integer_accepts_numeric_strings() {
        let record = raw(json!({ "ano": "2021", "year": "n/a" }));
        assert_eq!(record.integer(&["year", "ano"]), Some(2021));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(RawRecord::from_value(json!([1, 2])).is_none());
        assert!(RawRecord::from_value(json!("x")).is_none());
    }
}
