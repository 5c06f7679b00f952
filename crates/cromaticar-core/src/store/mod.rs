//! Paint and parts retailer search.
//!
//! The locator itself lives behind the catalog API; this module only builds
//! its request from a resolved color and carries the results through in the
//! order they arrive.

pub mod model;

use crate::error::{CatalogError, CatalogResult};
use crate::model::ColorRecord;
use crate::source::CatalogSource;
use model::{StoreResult, StoreSearchRequest};

/// User position for the locator. Either a postal code, coordinates, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserLocation {
    pub cep: Option<String>,
    pub coordinates: Option<(f64, f64)>,
}

impl StoreSearchRequest {
    /// Build a locator request for `color`.
    ///
    /// Vehicle fields the record does not know about are sent empty; the
    /// postal code is stripped to its digits.
    pub fn for_color(color: &ColorRecord, location: &UserLocation) -> Self {
        let cep = location
            .cep
            .as_deref()
            .map(|cep| cep.chars().filter(char::is_ascii_digit).collect::<String>())
            .filter(|cep| !cep.is_empty());

        Self {
            color_name: color.display_name.clone(),
            color_code: color.color_code.clone().unwrap_or_else(|| color.hex_code.clone()),
            car_brand: color.brand_name.clone().unwrap_or_default(),
            car_model: color.model_name.clone().unwrap_or_default(),
            car_year: color.model_year.map(|y| y.to_string()).unwrap_or_default(),
            user_cep: cep,
            user_lat: location.coordinates.map(|(lat, _)| lat),
            user_lng: location.coordinates.map(|(_, lng)| lng),
        }
    }
}

/// Ask the locator for retailers carrying `color`.
pub async fn find_stores<S>(
    source: &S,
    color: &ColorRecord,
    location: &UserLocation,
) -> CatalogResult<Vec<StoreResult>>
where
    S: CatalogSource + ?Sized,
{
    if let Some((lat, lng)) = location.coordinates {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(CatalogError::invalid_selection(
                "coordinates",
                format!("{}, {}", lat, lng),
            ));
        }
    }

    let request = StoreSearchRequest::for_color(color, location);
    let stores = source.search_stores(&request).await?;
    tracing::debug!(color = %color.id, count = stores.len(), "Store search completed");
    Ok(stores)
}
