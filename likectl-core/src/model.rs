//! Domain types shared by the reconciler, the orchestrator and the stores

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::ValidationError;

/// Maximum length for collection names
const MAX_COLLECTION_NAME_LEN: usize = 128;

/// Largest page a single listing call may return
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// Page size used when the caller gives none
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Company identifier. Not validated against the companies table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub i32);

impl CompanyId {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Collection identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(pub Uuid);

impl CollectionId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated, human-readable collection name (e.g. "Liked Companies")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    /// Create a collection name.
    ///
    /// Surrounding whitespace is trimmed; the result must be non-empty and at
    /// most 128 characters.
    ///
    /// ```
    /// use likectl_core::CollectionName;
    ///
    /// assert!(CollectionName::new("Liked Companies").is_ok());
    /// assert!(CollectionName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "collection name",
            });
        }

        if trimmed.chars().count() > MAX_COLLECTION_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "collection name",
                max: MAX_COLLECTION_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CollectionName {
    fn default() -> Self {
        Self("Liked Companies".to_owned())
    }
}

impl TryFrom<String> for CollectionName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CollectionName> for String {
    fn from(name: CollectionName) -> Self {
        name.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Company record (read-only from this crate's point of view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub company_name: String,
}

/// Company with its liked flag, as returned by listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedCompany {
    pub id: CompanyId,
    pub company_name: String,
    pub liked: bool,
}

/// Named grouping of companies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub id: CollectionId,
    pub collection_name: String,
}

/// Offset/limit window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u32,
}

impl PageWindow {
    /// Create a window; `limit` is clamped to `0..=1000`.
    pub fn new(offset: u64, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.min(MAX_PAGE_LIMIT),
        }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// One page of items plus the total count across all pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_name_trims() {
        let name = CollectionName::new("  Liked Companies ").unwrap();
        assert_eq!(name.as_str(), "Liked Companies");
    }

    #[test]
    fn collection_name_rejects_empty() {
        let err = CollectionName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn collection_name_max_length() {
        assert!(CollectionName::new(&"a".repeat(128)).is_ok());
        let err = CollectionName::new(&"a".repeat(129)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 128, .. }));
    }

    #[test]
    fn default_collection_name() {
        assert_eq!(CollectionName::default().as_str(), "Liked Companies");
    }

    #[test]
    fn page_window_clamps_limit() {
        assert_eq!(PageWindow::new(5, 50_000).limit, MAX_PAGE_LIMIT);
        assert_eq!(PageWindow::new(5, 0).limit, 0);
        assert_eq!(PageWindow::default(), PageWindow::new(0, 10));
    }

    #[test]
    fn page_map_keeps_total() {
        let page = Page {
            items: vec![1, 2, 3],
            total: 42,
        };
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.total, 42);
    }
}
