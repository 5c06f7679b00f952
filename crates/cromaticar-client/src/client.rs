//! Catalog API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use cromaticar_core::{
    CatalogError, CatalogResult, CatalogSource, RawRecord, SearchRequest, StoreResult,
    StoreSearchRequest,
};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ClientConfig;

/// HTTP client for the catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    base_url: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a client from a validated config.
    pub fn new(config: &ClientConfig) -> CatalogResult<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CatalogError::Config(format!("invalid base_url '{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Config(format!("base_url '{}' cannot hold paths", config.base_url)));
        }

        let timeout = config.timeout();
        Ok(Self {
            base_url,
            timeout,
            client: build_http(timeout)?,
        })
    }

    /// Create a client with default settings (localhost:3001/api, 10s).
    pub fn default_client() -> CatalogResult<Self> {
        Self::new(&ClientConfig::default())
    }

    /// Replace the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> CatalogResult<Self> {
        self.client = build_http(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Check whether the catalog answers at all.
    pub async fn health_check(&self) -> bool {
        let Ok(url) = self.endpoint(&["brands"]) else {
            return false;
        };
        match self.client.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Catalog health check failed");
                false
            }
        }
    }

    fn endpoint(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::Config(format!("base_url '{}' cannot hold paths", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and return the body of a 2xx response.
    async fn send(&self, request: RequestBuilder) -> CatalogResult<String> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let url = response.url().clone();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), "Catalog API returned an error");
            return Err(CatalogError::http(status.as_u16(), body));
        }

        response.text().await.map_err(|e| self.transport_error(e))
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], query: &[(&str, String)]) -> CatalogResult<T> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, ?query, "GET");
        let body = self.send(self.client.get(url).query(query)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET a JSON array of records. Entries that are not objects are dropped.
    async fn get_records(&self, segments: &[&str], query: &[(&str, String)]) -> CatalogResult<Vec<RawRecord>> {
        let values: Vec<Value> = self.get_json(segments, query).await?;

        let mut records = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match RawRecord::from_value(value) {
                Some(record) => records.push(record),
                None => warn!(index, "Skipping non-object entry in catalog response"),
            }
        }
        Ok(records)
    }

    /// GET a single JSON object. A 404 means no such entity and becomes
    /// `NotFound(what)`.
    async fn get_record(&self, segments: &[&str], what: String) -> CatalogResult<RawRecord> {
        match self.get_json::<Map<String, Value>>(segments, &[]).await {
            Ok(map) => Ok(RawRecord(map)),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND.as_u16()) => Err(CatalogError::NotFound(what)),
            Err(e) => Err(e),
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> CatalogError {
        if e.is_timeout() {
            CatalogError::Timeout(self.timeout)
        } else {
            CatalogError::unreachable(format!("Failed to reach catalog API: {}", e))
        }
    }
}

fn build_http(timeout: Duration) -> CatalogResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CatalogError::Config(format!("cannot build HTTP client: {}", e)))
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn search_colors(&self, request: &SearchRequest) -> CatalogResult<Vec<RawRecord>> {
        self.get_records(&["colors", "search"], &request.query_pairs()).await
    }

    async fn get_color(&self, id: &str) -> CatalogResult<RawRecord> {
        self.get_record(&["colors", id], format!("color {}", id)).await
    }

    async fn list_colors(&self) -> CatalogResult<Vec<RawRecord>> {
        self.get_records(&["colors"], &[]).await
    }

    async fn popular_colors(&self) -> CatalogResult<Vec<RawRecord>> {
        self.get_records(&["colors", "popular"], &[]).await
    }

    async fn list_brands(&self) -> CatalogResult<Vec<RawRecord>> {
        self.get_records(&["brands"], &[]).await
    }

    async fn search_brands(&self, query: &str) -> CatalogResult<Vec<RawRecord>> {
        self.get_records(&["brands", "search"], &[("q", query.trim().to_string())]).await
    }

    async fn get_brand(&self, brand_id: &str) -> CatalogResult<RawRecord> {
        self.get_record(&["brands", brand_id], format!("brand {}", brand_id)).await
    }

    async fn brand_colors(&self, brand_id: &str) -> CatalogResult<Vec<RawRecord>> {
        self.get_records(&["brands", brand_id, "colors"], &[]).await
    }

    async fn list_models(&self, brand_id: &str) -> CatalogResult<Vec<RawRecord>> {
        self.get_records(&["brands", brand_id, "models"], &[]).await
    }

    async fn list_years(&self, brand_id: &str) -> CatalogResult<Vec<RawRecord>> {
        self.get_records(&["brands", brand_id, "years"], &[]).await
    }

    async fn search_stores(&self, request: &StoreSearchRequest) -> CatalogResult<Vec<StoreResult>> {
        let url = self.endpoint(&["automotive-search", "search-stores"])?;
        debug!(url = %url, color = %request.color_name, "POST");
        let body = self.send(self.client.post(url).json(request)).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
