//! Cromaticar Core Library
//!
//! Canonical catalog entities and the search-and-filter data flow for the
//! Cromaticar automotive paint catalog.

pub mod detail;
pub mod error;
pub mod filter;
pub mod fixture;
pub mod model;
pub mod normalize;
pub mod render;
pub mod search;
pub mod source;
pub mod store;

pub use detail::{resolve_detail, ColorId};
pub use error::{CatalogError, CatalogResult};
pub use filter::{CascadingFilter, FilterPhase};
pub use fixture::StaticCatalog;
pub use model::{BrandRecord, ColorRecord, ModelRecord, YearRecord};
pub use render::{render, render_state, ColorCard, ResultView};
pub use search::model::{FilterValue, SearchFilters, SearchRequest, SearchState, SearchStatus};
pub use search::{SearchController, SearchOutcome};
pub use source::{CatalogSource, RawRecord};
pub use store::model::{StoreKind, StoreResult, StoreSearchRequest};
pub use store::{find_stores, UserLocation};
