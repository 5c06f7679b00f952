//! Filter-to-request normalization.

use crate::search::model::{FilterValue, SearchFilters, SearchRequest};

/// Convert user filters into the canonical request.
///
/// Numeric values become foreign keys, text becomes names, blank text is
/// dropped. A filter value typed as digits inside a `Name` (for example one
/// deserialized from a form) is promoted to an id as well.
pub fn normalize_filters(filters: &SearchFilters) -> SearchRequest {
    let (brand_id, brand_name) = split(filters.brand.as_ref());
    let (model_id, model_name) = split(filters.model.as_ref());

    SearchRequest {
        q: filters
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string),
        brand_id,
        brand_name,
        model_id,
        model_name,
        year: filters.year,
    }
}

fn split(value: Option<&FilterValue>) -> (Option<i64>, Option<String>) {
    match value {
        Some(FilterValue::Id(id)) => (Some(*id), None),
        Some(FilterValue::Name(name)) => match FilterValue::parse(name) {
            Some(FilterValue::Id(id)) => (Some(id), None),
            Some(FilterValue::Name(name)) => (None, Some(name)),
            None => (None, None),
        },
        None => (None, None),
    }
}
