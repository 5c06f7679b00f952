//! Single color lookup.

use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::model::ColorRecord;
use crate::normalize::normalize_color;
use crate::source::CatalogSource;

/// A color identifier as delivered by a router: one value or a list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorId {
    Single(String),
    Many(Vec<String>),
}

impl ColorId {
    /// The identifier to look up: the value itself, or the first element.
    pub fn resolve(&self) -> CatalogResult<&str> {
        let id = match self {
            Self::Single(id) => id.as_str(),
            Self::Many(ids) => ids
                .first()
                .map(String::as_str)
                .ok_or_else(|| CatalogError::InvalidIdentifier("empty identifier list".to_string()))?,
        };

        let id = id.trim();
        if id.is_empty() {
            return Err(CatalogError::InvalidIdentifier("blank identifier".to_string()));
        }
        Ok(id)
    }
}

impl From<&str> for ColorId {
    fn from(id: &str) -> Self {
        Self::Single(id.to_string())
    }
}

impl From<String> for ColorId {
    fn from(id: String) -> Self {
        Self::Single(id)
    }
}

impl From<Vec<String>> for ColorId {
    fn from(ids: Vec<String>) -> Self {
        Self::Many(ids)
    }
}

/// Fetch one color and normalize it.
///
/// Failures surface as-is: `InvalidIdentifier` for an unusable id,
/// `NotFound` when the catalog has no such color, normalization errors when
/// the record is broken.
pub async fn resolve_detail<S>(source: &S, id: impl Into<ColorId>) -> CatalogResult<ColorRecord>
where
    S: CatalogSource + ?Sized,
{
    let id = id.into();
    let id = id.resolve()?;

    debug!(id, "Resolving color detail");
    let raw = source.get_color(id).await?;
    normalize_color(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::StaticCatalog;

    #[tokio::test]
    async fn test_single_identifier() {
        let color = resolve_detail(&StaticCatalog::sample(), "5").await.unwrap();
        assert_eq!(color.display_name, "Azul Belize");
        assert_eq!(color.hex_code, "#1C468C");
        assert_eq!(color.brand_name.as_deref(), Some("Ford"));
    }

    #[tokio::test]
    async fn test_collection_uses_first() {
        let ids = vec!["7".to_string(), "1".to_string()];
        let color = resolve_detail(&StaticCatalog::sample(), ids).await.unwrap();
        assert_eq!(color.id, "7");
    }

    #[tokio::test]
    async fn test_empty_collection_invalid() {
        let err = resolve_detail(&StaticCatalog::sample(), Vec::<String>::new()).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidIdentifier(_)));

        let err = resolve_detail(&StaticCatalog::sample(), "  ").await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidIdentifier(_)));
    }

    #[tokio::test]
    async fn test_not_found() {
        let err = resolve_detail(&StaticCatalog::sample(), "999").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}
