//! Brand, model and year normalization.

use serde_json::Value;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{BrandRecord, ModelRecord, YearRecord};
use crate::source::RawRecord;

const BRAND_ID_KEYS: &[&str] = &["id", "id_montadora"];
const BRAND_NAME_KEYS: &[&str] = &["name", "nome"];
const LOGO_KEYS: &[&str] = &["logo", "logoUrl", "logo_url"];
const MODEL_LIST_KEYS: &[&str] = &["models", "modelos"];
const COLOR_COUNT_KEYS: &[&str] = &["colorCount", "total_cores", "color_count"];

const MODEL_ID_KEYS: &[&str] = &["id", "id_modelo"];
const MODEL_NAME_KEYS: &[&str] = &["name", "nome"];
const MODEL_BRAND_KEYS: &[&str] = &["brandId", "id_montadora", "brand_id"];

const YEAR_ID_KEYS: &[&str] = &["id", "id_ano"];
const YEAR_VALUE_KEYS: &[&str] = &["year", "ano"];

/// Normalize a raw brand record.
///
/// The embedded model list may hold full model objects or bare model names;
/// entries that cannot be read are dropped. The color count is carried as
/// reported and never checked against anything.
pub fn normalize_brand(raw: &RawRecord) -> CatalogResult<BrandRecord> {
    let id = raw.text(BRAND_ID_KEYS).ok_or(CatalogError::MissingIdentifier)?;
    let name = raw.text(BRAND_NAME_KEYS).unwrap_or_else(|| id.clone());

    let models = raw
        .list(MODEL_LIST_KEYS)
        .map(|values| {
            values
                .iter()
                .filter_map(|value| model_from_value(value, &id))
                .collect()
        })
        .unwrap_or_default();

    let color_count = raw
        .integer(COLOR_COUNT_KEYS)
        .and_then(|count| u32::try_from(count).ok());

    Ok(BrandRecord {
        id,
        name,
        logo: raw.text(LOGO_KEYS),
        models,
        color_count,
    })
}

/// Normalize a raw model record.
pub fn normalize_model(raw: &RawRecord) -> CatalogResult<ModelRecord> {
    let id = raw.text(MODEL_ID_KEYS).ok_or(CatalogError::MissingIdentifier)?;
    let name = raw.text(MODEL_NAME_KEYS).unwrap_or_else(|| id.clone());

    Ok(ModelRecord {
        id,
        name,
        brand_id: raw.text(MODEL_BRAND_KEYS),
    })
}

/// Normalize a raw year record. A record with only a year uses the year as id.
pub fn normalize_year(raw: &RawRecord) -> CatalogResult<YearRecord> {
    let year = raw
        .integer(YEAR_VALUE_KEYS)
        .ok_or_else(|| CatalogError::InvalidIdentifier("year record without a year".to_string()))?;
    let year = i32::try_from(year)
        .map_err(|_| CatalogError::InvalidIdentifier(format!("year {} is out of range", year)))?;

    Ok(YearRecord {
        id: raw.integer(YEAR_ID_KEYS).unwrap_or(i64::from(year)),
        year,
    })
}

fn model_from_value(value: &Value, brand_id: &str) -> Option<ModelRecord> {
    match value {
        Value::String(name) if !name.trim().is_empty() => Some(ModelRecord {
            id: name.trim().to_string(),
            name: name.trim().to_string(),
            brand_id: Some(brand_id.to_string()),
        }),
        Value::Object(map) => {
            let mut model = normalize_model(&RawRecord(map.clone())).ok()?;
            model.brand_id.get_or_insert_with(|| brand_id.to_string());
            Some(model)
        }
        _ => None,
    }
}
