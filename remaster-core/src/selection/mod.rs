//! Item-selection query construction and the index boundary.
//!
//! A pass starts from an [`ItemSelection`] assembled out of caller options,
//! adjusted by the deployment's [`SelectionHook`], and executed against
//! whatever [`ItemIndex`] backs the content store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use remaster_model::{CatalogSlug, ItemId, ItemKind, ItemStatus};

use crate::Result;

mod memory;
#[cfg(feature = "database")]
mod postgres;

pub use memory::{IndexedItem, MemoryItemIndex};
#[cfg(feature = "database")]
pub use postgres::PgItemIndex;

/// Page-size bound for a selection query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PerPage {
    /// Single unbounded page.
    #[default]
    All,
    Limit(u32),
}

impl PerPage {
    fn from_count(count: u64) -> Self {
        if count == 0 {
            PerPage::All
        } else {
            PerPage::Limit(count.min(u32::MAX as u64) as u32)
        }
    }
}

impl std::str::FromStr for PerPage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(PerPage::All);
        }
        trimmed
            .parse::<u64>()
            .map(PerPage::from_count)
            .map_err(|_| format!("expected \"all\" or a page size, got {trimmed:?}"))
    }
}

impl Serialize for PerPage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PerPage::All => serializer.serialize_str("all"),
            PerPage::Limit(n) => serializer.serialize_u32(*n),
        }
    }
}

impl<'de> Deserialize<'de> for PerPage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(count) => Ok(PerPage::from_count(count)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// The assembled selection query handed to the item index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSelection {
    pub kinds: Vec<ItemKind>,
    pub status: ItemStatus,
    pub per_page: PerPage,
    /// 1-based page number.
    pub page: u32,
    pub catalog: Option<CatalogSlug>,
    /// Explicit id allow-list intersected into the query.
    pub only: Vec<ItemId>,
}

impl Default for ItemSelection {
    fn default() -> Self {
        Self {
            kinds: ItemKind::DEFAULT_PAIR.to_vec(),
            status: ItemStatus::Published,
            per_page: PerPage::All,
            page: 1,
            catalog: None,
            only: Vec::new(),
        }
    }
}

impl ItemSelection {
    /// Row offset implied by the page number and page size.
    pub fn offset(&self) -> u64 {
        match self.per_page {
            PerPage::All => 0,
            PerPage::Limit(per_page) => {
                u64::from(self.page.saturating_sub(1)) * u64::from(per_page)
            }
        }
    }
}

/// One executed page of a selection, plus the match count across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPage {
    /// Matching ids in processing order.
    pub ids: Vec<ItemId>,
    pub total_matches: u64,
}

impl SelectionPage {
    pub fn total_pages(&self, per_page: PerPage) -> u32 {
        if self.total_matches == 0 {
            return 0;
        }
        match per_page {
            PerPage::All => 1,
            PerPage::Limit(per_page) if per_page > 0 => {
                self.total_matches.div_ceil(u64::from(per_page)).min(u64::from(u32::MAX)) as u32
            }
            PerPage::Limit(_) => 1,
        }
    }
}

/// Query capability of the content store.
#[async_trait]
pub trait ItemIndex: Send + Sync {
    async fn select(&self, selection: &ItemSelection) -> Result<SelectionPage>;
}

/// Deployment-level customization point applied to every assembled selection
/// before execution.
pub trait SelectionHook: Send + Sync {
    fn adjust(&self, selection: &mut ItemSelection);
}

/// Default hook; leaves the selection untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSelectionHook;

impl SelectionHook for NoopSelectionHook {
    fn adjust(&self, _selection: &mut ItemSelection) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_page_parsing() {
        assert_eq!("all".parse::<PerPage>().unwrap(), PerPage::All);
        assert_eq!("All".parse::<PerPage>().unwrap(), PerPage::All);
        assert_eq!("250".parse::<PerPage>().unwrap(), PerPage::Limit(250));
        assert_eq!("0".parse::<PerPage>().unwrap(), PerPage::All);
        assert!("many".parse::<PerPage>().is_err());
    }

    #[test]
    fn test_per_page_deserialize_number_or_text() {
        assert_eq!(
            serde_json::from_str::<PerPage>("500").unwrap(),
            PerPage::Limit(500)
        );
        assert_eq!(
            serde_json::from_str::<PerPage>("\"all\"").unwrap(),
            PerPage::All
        );
    }

    #[test]
    fn test_offset_arithmetic() {
        let mut selection = ItemSelection {
            per_page: PerPage::Limit(50),
            page: 3,
            ..Default::default()
        };
        assert_eq!(selection.offset(), 100);

        selection.per_page = PerPage::All;
        assert_eq!(selection.offset(), 0);

        selection.per_page = PerPage::Limit(50);
        selection.page = 0;
        assert_eq!(selection.offset(), 0);
    }

    #[test]
    fn test_total_pages() {
        let page = SelectionPage {
            ids: Vec::new(),
            total_matches: 101,
        };
        assert_eq!(page.total_pages(PerPage::Limit(50)), 3);
        assert_eq!(page.total_pages(PerPage::All), 1);

        let empty = SelectionPage {
            ids: Vec::new(),
            total_matches: 0,
        };
        assert_eq!(empty.total_pages(PerPage::All), 0);
    }
}
