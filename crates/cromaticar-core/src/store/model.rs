//! Store locator models.

use serde::{Deserialize, Serialize};

/// Body of `POST /automotive-search/search-stores`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSearchRequest {
    pub color_name: String,
    pub color_code: String,
    pub car_brand: String,
    pub car_model: String,
    pub car_year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_cep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_lng: Option<f64>,
}

/// Where a retailer sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Physical,
    Online,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Online => "online",
        }
    }
}

/// A retailer returned by the store locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreResult {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: StoreKind,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub time_min: Option<f64>,
    /// Online store delivers to the user's postal code.
    #[serde(default)]
    pub ships_to_cep: bool,
    /// Store is likely to stock the paint.
    #[serde(default)]
    pub has_product: bool,
    pub product_match: String,
}
