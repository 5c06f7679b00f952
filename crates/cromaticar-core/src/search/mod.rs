//! Search controller.
//!
//! Owns the filters and results of the color search and drives them through
//! `Idle → Loading → Ready | Error`. Every search takes a generation number;
//! a response is applied only if no newer search was started after it, so the
//! visible state always belongs to the most recently initiated search.

pub mod model;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::normalize::{normalize_all, normalize_color_with, ColorContext};
use crate::source::{CatalogSource, RawRecord};
use model::{FilterValue, SearchFilters, SearchRequest, SearchState, SearchStatus};

/// Default bound on a single catalog round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle for a search that has been started but not yet resolved.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    request: SearchRequest,
    context: ColorContext,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }
}

/// What happened to a resolved search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results applied; carries the number of records shown.
    Ready(usize),
    /// Failure applied to the visible state.
    Failed,
    /// A newer search was started meanwhile; the response was dropped.
    Superseded,
}

struct Inner {
    state: SearchState,
    latest: u64,
}

/// Color search controller over any [`CatalogSource`].
pub struct SearchController<S: ?Sized> {
    source: Arc<S>,
    inner: Mutex<Inner>,
    timeout: Duration,
}

impl<S> SearchController<S>
where
    S: CatalogSource + ?Sized,
{
    /// Create an idle controller.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                state: SearchState::default(),
                latest: 0,
            }),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound each round trip by `timeout` instead of [`DEFAULT_TIMEOUT`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Snapshot of the visible state.
    pub fn state(&self) -> SearchState {
        self.lock().state.clone()
    }

    pub fn status(&self) -> SearchStatus {
        self.lock().state.status
    }

    /// Run a search for `filters` and apply its result unless superseded.
    pub async fn search(&self, filters: SearchFilters) -> SearchOutcome {
        let ticket = self.begin(filters);
        debug!(generation = ticket.generation, request = ?ticket.request, "Searching colors");

        let result = match tokio::time::timeout(self.timeout, self.source.search_colors(&ticket.request)).await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::Timeout(self.timeout)),
        };

        self.complete(ticket, result)
    }

    /// Start a search: store the filters and enter `Loading` right away.
    ///
    /// Prior results stay in the state; the renderer hides them while loading.
    pub fn begin(&self, filters: SearchFilters) -> SearchTicket {
        let request = SearchRequest::from_filters(&filters);
        let context = context_for(&filters);

        let mut inner = self.lock();
        inner.latest += 1;
        inner.state.filters = filters;
        inner.state.status = SearchStatus::Loading;
        inner.state.error_message = None;
        inner.state.searched = true;

        SearchTicket {
            generation: inner.latest,
            request,
            context,
        }
    }

    /// Apply the response for `ticket`, unless a newer search has started.
    pub fn complete(&self, ticket: SearchTicket, result: CatalogResult<Vec<RawRecord>>) -> SearchOutcome {
        let mut inner = self.lock();

        if ticket.generation != inner.latest {
            debug!(
                generation = ticket.generation,
                latest = inner.latest,
                "Discarding superseded search response"
            );
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(raws) => {
                let normalized = normalize_all(&raws, |raw| normalize_color_with(raw, &ticket.context));
                for (index, reason) in &normalized.rejected {
                    warn!(index, error = %reason, "Skipping color record that failed normalization");
                }

                let count = normalized.records.len();
                info!(count, skipped = normalized.rejected.len(), "Color search completed");

                inner.state.results = normalized.records;
                inner.state.status = SearchStatus::Ready;
                inner.state.error_message = None;
                SearchOutcome::Ready(count)
            }
            Err(e) => {
                warn!(error = %e, "Color search failed");
                inner.state.results.clear();
                inner.state.status = SearchStatus::Error;
                inner.state.error_message = Some(e.user_message());
                SearchOutcome::Failed
            }
        }
    }

    /// Reset filters and results and return to `Idle`.
    ///
    /// Searches still in flight are superseded.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.latest += 1;
        inner.state = SearchState::default();
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Vehicle defaults for records that do not name their own brand/model/year.
fn context_for(filters: &SearchFilters) -> ColorContext {
    let name = |value: &Option<FilterValue>| match value {
        Some(FilterValue::Name(name)) => Some(name.clone()),
        _ => None,
    };

    ColorContext {
        brand_name: name(&filters.brand),
        model_name: name(&filters.model),
        model_year: filters.year,
    }
}
