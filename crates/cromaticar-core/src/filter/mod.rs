//! Cascading brand → model → year filter.
//!
//! The brand constrains which models are valid. Changing the brand drops the
//! selected model and reloads the model list for the new brand; clearing the
//! brand drops model and year too. The year can be set on its own at any
//! time and never cascades.
//!
//! Invalid selections fail with [`CatalogError::InvalidSelection`] and leave
//! the state untouched.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::model::{BrandRecord, ModelRecord};
use crate::normalize::{normalize_all, normalize_brand, normalize_model};
use crate::search::model::{FilterValue, SearchFilters};
use crate::source::CatalogSource;

/// Where the selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPhase {
    NoBrand,
    /// Brand chosen, no year; a model may or may not be chosen.
    BrandSelected,
    /// Brand and year chosen, no model yet.
    BrandAndYearSelected,
    /// Brand, model and year all chosen.
    FullySpecified,
}

/// Brand/model/year selection state.
#[derive(Debug, Clone, Default)]
pub struct CascadingFilter {
    brand_options: Vec<BrandRecord>,
    brand: Option<BrandRecord>,
    model_options: Vec<ModelRecord>,
    /// False until the current brand's model list has been fetched.
    models_loaded: bool,
    model: Option<ModelRecord>,
    year: Option<i32>,
}

impl CascadingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FilterPhase {
        match (&self.brand, &self.model, self.year) {
            (None, _, _) => FilterPhase::NoBrand,
            (Some(_), Some(_), Some(_)) => FilterPhase::FullySpecified,
            (Some(_), None, Some(_)) => FilterPhase::BrandAndYearSelected,
            (Some(_), _, None) => FilterPhase::BrandSelected,
        }
    }

    pub fn brand(&self) -> Option<&BrandRecord> {
        self.brand.as_ref()
    }

    pub fn model(&self) -> Option<&ModelRecord> {
        self.model.as_ref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn brand_options(&self) -> &[BrandRecord] {
        &self.brand_options
    }

    pub fn model_options(&self) -> &[ModelRecord] {
        &self.model_options
    }

    /// Fetch the brand list. Once loaded, only listed brands can be selected.
    pub async fn load_brands<S>(&mut self, source: &S) -> CatalogResult<&[BrandRecord]>
    where
        S: CatalogSource + ?Sized,
    {
        let raws = source.list_brands().await?;
        let normalized = normalize_all(&raws, normalize_brand);
        for (index, reason) in &normalized.rejected {
            warn!(index, error = %reason, "Skipping brand record that failed normalization");
        }
        self.brand_options = normalized.records;
        Ok(&self.brand_options)
    }

    /// Select a brand by id or name and load its models.
    ///
    /// Selecting the brand that is already selected changes nothing once its
    /// models are loaded. When the model list cannot be fetched the brand
    /// stays selected with no model options and the fetch error is returned;
    /// selecting it again retries the fetch.
    pub async fn select_brand<S>(&mut self, value: &str, source: &S) -> CatalogResult<FilterPhase>
    where
        S: CatalogSource + ?Sized,
    {
        let brand = self.resolve_brand(value)?;

        let same_brand = self.brand.as_ref().is_some_and(|current| current.id == brand.id);
        if same_brand && self.models_loaded {
            return Ok(self.phase());
        }

        let brand_id = brand.id.clone();
        if same_brand {
            debug!(brand = %brand.name, "Retrying model list for selected brand");
        } else {
            debug!(brand = %brand.name, "Brand selected, reloading models");
            self.brand = Some(brand);
            self.model = None;
            self.model_options.clear();
            self.models_loaded = false;
        }

        let raws = source.list_models(&brand_id).await?;
        let normalized = normalize_all(&raws, normalize_model);
        for (index, reason) in &normalized.rejected {
            warn!(index, error = %reason, "Skipping model record that failed normalization");
        }
        self.model_options = normalized.records;
        self.models_loaded = true;

        Ok(self.phase())
    }

    /// Select a model from the current brand's model list.
    pub fn select_model(&mut self, value: &str) -> CatalogResult<FilterPhase> {
        if self.brand.is_none() {
            return Err(CatalogError::invalid_selection("model", value));
        }

        let model = self
            .model_options
            .iter()
            .find(|m| m.matches(value))
            .cloned()
            .ok_or_else(|| CatalogError::invalid_selection("model", value))?;

        self.model = Some(model);
        Ok(self.phase())
    }

    pub fn clear_model(&mut self) -> FilterPhase {
        self.model = None;
        self.phase()
    }

    /// Set or clear the year. Never touches brand or model.
    pub fn select_year(&mut self, year: Option<i32>) -> FilterPhase {
        self.year = year;
        self.phase()
    }

    /// Drop the brand along with the model and year that depend on it.
    pub fn clear_brand(&mut self) -> FilterPhase {
        self.brand = None;
        self.model = None;
        self.model_options.clear();
        self.models_loaded = false;
        self.year = None;
        self.phase()
    }

    /// Search filters for the current selection.
    pub fn to_filters(&self) -> SearchFilters {
        SearchFilters {
            query: None,
            brand: self.brand.as_ref().and_then(|b| FilterValue::parse(&b.id)),
            model: self.model.as_ref().and_then(|m| FilterValue::parse(&m.id)),
            year: self.year,
        }
    }

    fn resolve_brand(&self, value: &str) -> CatalogResult<BrandRecord> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CatalogError::invalid_selection("brand", value));
        }

        if self.brand_options.is_empty() {
            return Ok(BrandRecord {
                id: value.to_string(),
                name: value.to_string(),
                logo: None,
                models: Vec::new(),
                color_count: None,
            });
        }

        self.brand_options
            .iter()
            .find(|b| b.matches(value))
            .cloned()
            .ok_or_else(|| CatalogError::invalid_selection("brand", value))
    }
}
