//! Boundary normalization.
//!
//! The catalog API speaks snake-style Portuguese keys (`id_cor`, `nome_cor`,
//! `montadora`), internal producers use camel-style keys (`displayName`,
//! `hexCode`, `brandName`). Everything is merged here, field by field, into
//! the canonical entities of [`crate::model`].
//!
//! Precedence for every canonical field: the camel-style internal key, then
//! the API key, then legacy aliases. An explicit value under any of them wins
//! over a default derived from context.

pub mod catalog;
pub mod color;
pub mod request;

pub use catalog::{normalize_brand, normalize_model, normalize_year};
pub use color::{normalize_color, normalize_color_with, ColorContext, Rgb};
pub use request::normalize_filters;

use crate::error::CatalogError;
use crate::source::RawRecord;

/// Outcome of normalizing a batch of raw records.
#[derive(Debug, Default)]
pub struct Normalized<T> {
    /// Records that normalized cleanly, in input order.
    pub records: Vec<T>,
    /// Input position and reason for every record that was excluded.
    pub rejected: Vec<(usize, CatalogError)>,
}

/// Normalize every record with `f`, keeping failures apart instead of
/// aborting the batch.
pub fn normalize_all<T, F>(raws: &[RawRecord], f: F) -> Normalized<T>
where
    F: Fn(&RawRecord) -> Result<T, CatalogError>,
{
    let mut out = Normalized {
        records: Vec::with_capacity(raws.len()),
        rejected: Vec::new(),
    };

    for (index, raw) in raws.iter().enumerate() {
        match f(raw) {
            Ok(record) => out.records.push(record),
            Err(e) => out.rejected.push((index, e)),
        }
    }

    out
}
