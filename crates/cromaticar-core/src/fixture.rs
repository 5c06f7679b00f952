//! In-memory catalog.
//!
//! Serves a small fixed catalog in the API's own wire shape, so everything
//! downstream goes through the same normalization as live data. Used for
//! offline mode and tests.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{CatalogError, CatalogResult};
use crate::search::model::SearchRequest;
use crate::source::{CatalogSource, RawRecord};
use crate::store::model::{StoreKind, StoreResult, StoreSearchRequest};

/// Number of colors returned by `popular_colors`.
const POPULAR_LIMIT: usize = 4;

#[derive(Debug, Clone)]
struct BrandEntry {
    id: i64,
    name: &'static str,
    models: Vec<(i64, &'static str)>,
}

#[derive(Debug, Clone)]
struct ColorEntry {
    id: i64,
    name: &'static str,
    code: &'static str,
    rgb: &'static str,
    brand_id: i64,
    model_id: i64,
    year: i32,
    category: &'static str,
}

/// A fixed, in-memory [`CatalogSource`].
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    brands: Vec<BrandEntry>,
    colors: Vec<ColorEntry>,
}

impl StaticCatalog {
    /// A catalog with no brands and no colors.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Six brands, their current models and a dozen factory colors.
    pub fn sample() -> Self {
        let brands = vec![
            BrandEntry { id: 1, name: "Chevrolet", models: vec![(11, "S10"), (12, "Onix"), (13, "Tracker"), (14, "Cruze")] },
            BrandEntry { id: 2, name: "Ford", models: vec![(21, "Ranger"), (22, "Fiesta"), (23, "Focus"), (24, "EcoSport")] },
            BrandEntry { id: 3, name: "Volkswagen", models: vec![(31, "Gol"), (32, "Polo"), (33, "Virtus"), (34, "T-Cross")] },
            BrandEntry { id: 4, name: "Fiat", models: vec![(41, "Strada"), (42, "Argo"), (43, "Cronos"), (44, "Mobi")] },
            BrandEntry { id: 5, name: "Toyota", models: vec![(51, "Hilux"), (52, "Corolla"), (53, "Yaris"), (54, "SW4")] },
            BrandEntry { id: 6, name: "Honda", models: vec![(61, "Civic"), (62, "HR-V"), (63, "City"), (64, "WR-V")] },
        ];

        let colors = vec![
            ColorEntry { id: 1, name: "Vermelho Chili", code: "GPJ", rgb: "255,59,48", brand_id: 1, model_id: 11, year: 2023, category: "Sólido" },
            ColorEntry { id: 2, name: "Cinza Graphite", code: "GXG", rgb: "102,102,102", brand_id: 1, model_id: 11, year: 2023, category: "Metálico" },
            ColorEntry { id: 3, name: "Branco Summit", code: "GAZ", rgb: "250,250,250", brand_id: 1, model_id: 12, year: 2022, category: "Sólido" },
            ColorEntry { id: 4, name: "Prata Shark", code: "GAN", rgb: "192,192,192", brand_id: 1, model_id: 13, year: 2021, category: "Metálico" },
            ColorEntry { id: 5, name: "Azul Belize", code: "A2", rgb: "28,70,140", brand_id: 2, model_id: 21, year: 2022, category: "Metálico" },
            ColorEntry { id: 6, name: "Preto Bristol", code: "JA", rgb: "20,20,22", brand_id: 2, model_id: 22, year: 2019, category: "Perolizado" },
            ColorEntry { id: 7, name: "Branco Cristal", code: "B4", rgb: "245,245,240", brand_id: 3, model_id: 31, year: 2020, category: "Sólido" },
            ColorEntry { id: 8, name: "Cinza Platinum", code: "7B", rgb: "130,133,136", brand_id: 3, model_id: 32, year: 2023, category: "Metálico" },
            ColorEntry { id: 9, name: "Vermelho Montecarlo", code: "111", rgb: "178,24,30", brand_id: 4, model_id: 42, year: 2021, category: "Sólido" },
            ColorEntry { id: 10, name: "Branco Banchisa", code: "268", rgb: "248,248,246", brand_id: 4, model_id: 41, year: 2023, category: "Sólido" },
            ColorEntry { id: 11, name: "Prata Supernova", code: "1D6", rgb: "180,182,185", brand_id: 5, model_id: 52, year: 2022, category: "Metálico" },
            ColorEntry { id: 12, name: "Azul Cósmico", code: "B593M", rgb: "30,50,95", brand_id: 6, model_id: 61, year: 2020, category: "Metálico" },
        ];

        Self { brands, colors }
    }

    fn brand(&self, key: &str) -> Option<&BrandEntry> {
        let key = key.trim();
        self.brands
            .iter()
            .find(|b| b.id.to_string() == key || b.name.eq_ignore_ascii_case(key))
    }

    fn model_name(&self, brand_id: i64, model_id: i64) -> &'static str {
        self.brands
            .iter()
            .find(|b| b.id == brand_id)
            .and_then(|b| b.models.iter().find(|(id, _)| *id == model_id))
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }

    fn color_record(&self, color: &ColorEntry) -> RawRecord {
        let brand = self
            .brands
            .iter()
            .find(|b| b.id == color.brand_id)
            .map(|b| b.name)
            .unwrap_or_default();

        raw(json!({
            "id_cor": color.id,
            "nome_cor": color.name,
            "codigo_cor": color.code,
            "rgb": color.rgb,
            "montadora": brand,
            "modelo": self.model_name(color.brand_id, color.model_id),
            "ano": color.year,
            "categoria": color.category,
        }))
    }

    fn brand_record(&self, brand: &BrandEntry) -> RawRecord {
        let color_count = self.colors.iter().filter(|c| c.brand_id == brand.id).count();
        raw(json!({
            "id_montadora": brand.id,
            "nome": brand.name,
            "total_cores": color_count,
        }))
    }

    fn matches(&self, color: &ColorEntry, request: &SearchRequest) -> bool {
        let brand_ok = match (request.brand_id, &request.brand_name) {
            (Some(id), _) => color.brand_id == id,
            (None, Some(name)) => self.brand(name).is_some_and(|b| b.id == color.brand_id),
            (None, None) => true,
        };

        let model_ok = match (request.model_id, &request.model_name) {
            (Some(id), _) => color.model_id == id,
            (None, Some(name)) => self
                .model_name(color.brand_id, color.model_id)
                .eq_ignore_ascii_case(name),
            (None, None) => true,
        };

        let year_ok = request.year.map_or(true, |year| color.year == year);

        let query_ok = request.q.as_deref().map_or(true, |q| {
            let q = q.to_lowercase();
            color.name.to_lowercase().contains(&q) || color.code.to_lowercase().contains(&q)
        });

        brand_ok && model_ok && year_ok && query_ok
    }
}

fn raw(value: serde_json::Value) -> RawRecord {
    RawRecord::from_value(value).unwrap_or_default()
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn search_colors(&self, request: &SearchRequest) -> CatalogResult<Vec<RawRecord>> {
        Ok(self
            .colors
            .iter()
            .filter(|c| self.matches(c, request))
            .map(|c| self.color_record(c))
            .collect())
    }

    async fn get_color(&self, id: &str) -> CatalogResult<RawRecord> {
        self.colors
            .iter()
            .find(|c| c.id.to_string() == id.trim())
            .map(|c| self.color_record(c))
            .ok_or_else(|| CatalogError::NotFound(format!("color {}", id)))
    }

    async fn list_colors(&self) -> CatalogResult<Vec<RawRecord>> {
        Ok(self.colors.iter().map(|c| self.color_record(c)).collect())
    }

    async fn popular_colors(&self) -> CatalogResult<Vec<RawRecord>> {
        Ok(self
            .colors
            .iter()
            .take(POPULAR_LIMIT)
            .map(|c| self.color_record(c))
            .collect())
    }

    async fn list_brands(&self) -> CatalogResult<Vec<RawRecord>> {
        let mut brands: Vec<&BrandEntry> = self.brands.iter().collect();
        brands.sort_by_key(|b| b.name);
        Ok(brands.into_iter().map(|b| self.brand_record(b)).collect())
    }

    async fn search_brands(&self, query: &str) -> CatalogResult<Vec<RawRecord>> {
        let query = query.trim().to_lowercase();
        Ok(self
            .brands
            .iter()
            .filter(|b| b.name.to_lowercase().contains(&query))
            .map(|b| self.brand_record(b))
            .collect())
    }

    async fn get_brand(&self, brand_id: &str) -> CatalogResult<RawRecord> {
        let brand = self
            .brand(brand_id)
            .ok_or_else(|| CatalogError::NotFound(format!("brand {}", brand_id)))?;

        let mut record = self.brand_record(brand);
        let models: Vec<&str> = brand.models.iter().map(|(_, name)| *name).collect();
        record.0.insert("modelos".to_string(), json!(models));
        Ok(record)
    }

    async fn brand_colors(&self, brand_id: &str) -> CatalogResult<Vec<RawRecord>> {
        let brand = self
            .brand(brand_id)
            .ok_or_else(|| CatalogError::NotFound(format!("brand {}", brand_id)))?;

        Ok(self
            .colors
            .iter()
            .filter(|c| c.brand_id == brand.id)
            .map(|c| self.color_record(c))
            .collect())
    }

    async fn list_models(&self, brand_id: &str) -> CatalogResult<Vec<RawRecord>> {
        let brand = self
            .brand(brand_id)
            .ok_or_else(|| CatalogError::NotFound(format!("brand {}", brand_id)))?;

        Ok(brand
            .models
            .iter()
            .map(|(id, name)| raw(json!({ "id_modelo": id, "nome": name, "id_montadora": brand.id })))
            .collect())
    }

    async fn list_years(&self, brand_id: &str) -> CatalogResult<Vec<RawRecord>> {
        let brand = self
            .brand(brand_id)
            .ok_or_else(|| CatalogError::NotFound(format!("brand {}", brand_id)))?;

        let mut years: Vec<i32> = self
            .colors
            .iter()
            .filter(|c| c.brand_id == brand.id)
            .map(|c| c.year)
            .collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();

        Ok(years.into_iter().map(|year| raw(json!({ "ano": year }))).collect())
    }

    async fn search_stores(&self, request: &StoreSearchRequest) -> CatalogResult<Vec<StoreResult>> {
        Ok(vec![
            StoreResult {
                name: "Tintas Automotivas Centro".to_string(),
                url: "https://www.google.com/maps/search/tintas+automotivas".to_string(),
                kind: StoreKind::Physical,
                address: Some("Av. Paulista, 1000 - São Paulo".to_string()),
                phone: Some("(11) 3000-0000".to_string()),
                distance_km: Some(2.4),
                time_min: Some(9.0),
                ships_to_cep: false,
                has_product: true,
                product_match: format!("Tinta {} {}", request.color_name, request.car_model).trim().to_string(),
            },
            StoreResult {
                name: "Mercado Livre".to_string(),
                url: format!("https://lista.mercadolivre.com.br/tinta-automotiva-{}", request.color_code),
                kind: StoreKind::Online,
                address: None,
                phone: None,
                distance_km: None,
                time_min: None,
                ships_to_cep: request.user_cep.is_some(),
                has_product: true,
                product_match: format!("Código {}", request.color_code),
            },
        ])
    }
}
