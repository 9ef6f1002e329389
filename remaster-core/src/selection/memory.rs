use async_trait::async_trait;

use remaster_model::{CatalogSlug, ItemId, ItemKind, ItemStatus};

use super::{ItemIndex, ItemSelection, PerPage, SelectionPage};
use crate::Result;

/// One row of the in-memory index.
#[derive(Debug, Clone)]
pub struct IndexedItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub status: ItemStatus,
    pub catalogs: Vec<CatalogSlug>,
}

impl IndexedItem {
    pub fn published(id: u64, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(id),
            kind,
            status: ItemStatus::Published,
            catalogs: Vec::new(),
        }
    }

    pub fn in_catalog(mut self, slug: &str) -> Self {
        if let Some(slug) = CatalogSlug::new(slug) {
            self.catalogs.push(slug);
        }
        self
    }
}

/// In-memory item index for tests and infrastructure-free dev runs.
#[derive(Debug, Default)]
pub struct MemoryItemIndex {
    items: Vec<IndexedItem>,
}

impl MemoryItemIndex {
    pub fn new(items: Vec<IndexedItem>) -> Self {
        Self { items }
    }

    /// Seeds `count` published items with ids 1..=count, alternating kinds.
    pub fn seeded(count: u64) -> Self {
        let items = (1..=count)
            .map(|id| {
                let kind = if id % 2 == 0 {
                    ItemKind::Series
                } else {
                    ItemKind::Movie
                };
                IndexedItem::published(id, kind)
            })
            .collect();
        Self { items }
    }
}

#[async_trait]
impl ItemIndex for MemoryItemIndex {
    async fn select(&self, selection: &ItemSelection) -> Result<SelectionPage> {
        let mut matches: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| {
                selection.kinds.contains(&item.kind)
                    && item.status == selection.status
                    && selection
                        .catalog
                        .as_ref()
                        .is_none_or(|slug| item.catalogs.contains(slug))
                    && (selection.only.is_empty() || selection.only.contains(&item.id))
            })
            .map(|item| item.id)
            .collect();
        matches.sort();

        let total_matches = matches.len() as u64;
        let ids = match selection.per_page {
            PerPage::All => matches,
            PerPage::Limit(per_page) => matches
                .into_iter()
                .skip(selection.offset() as usize)
                .take(per_page as usize)
                .collect(),
        };

        Ok(SelectionPage { ids, total_matches })
    }
}
