//! Canonical catalog entities.
//!
//! Every record coming from the catalog API is converted into one of these
//! shapes by [`crate::normalize`] before anything else touches it.

use serde::{Deserialize, Serialize};

/// A paint color after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecord {
    pub id: String,
    pub display_name: String,
    /// Always `#RRGGBB`, uppercase.
    pub hex_code: String,
    pub rgb_triple: Option<String>,
    pub color_code: Option<String>,
    pub brand_name: Option<String>,
    pub model_name: Option<String>,
    pub model_year: Option<i32>,
    pub category: Option<String>,
}

impl ColorRecord {
    /// One-line "Brand Model Year" description, skipping unknown parts.
    pub fn vehicle_label(&self) -> Option<String> {
        let year = self.model_year.map(|y| y.to_string());
        let parts: Vec<&str> = [
            self.brand_name.as_deref(),
            self.model_name.as_deref(),
            year.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// A car manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRecord {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub models: Vec<ModelRecord>,
    /// Denormalized display figure reported by the API. Not authoritative.
    pub color_count: Option<u32>,
}

impl BrandRecord {
    /// Whether `value` names this brand by id or (case-insensitively) by name.
    pub fn matches(&self, value: &str) -> bool {
        let value = value.trim();
        self.id == value || self.name.eq_ignore_ascii_case(value)
    }
}

/// A vehicle model belonging to a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub id: String,
    pub name: String,
    pub brand_id: Option<String>,
}

impl ModelRecord {
    /// Whether `value` names this model by id or (case-insensitively) by name.
    pub fn matches(&self, value: &str) -> bool {
        let value = value.trim();
        self.id == value || self.name.eq_ignore_ascii_case(value)
    }
}

/// A model year offered for a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRecord {
    pub id: i64,
    pub year: i32,
}
