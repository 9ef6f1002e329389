//! Sequential batch pass over selected content items.
//!
//! A pass is three independent settings values (running flag, item list,
//! cursor) walked by [`BatchCursor`]. The cursor is the only advancement
//! mechanism: `start` selects and persists the list then advances to the
//! first item, `next` steps forward one item at a time, and `stop` resets
//! everything. The resting state is idle, both before the first pass and
//! after completion or abort.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use remaster_model::{CatalogSlug, ItemId, ItemKind, ItemStatus};

use crate::Result;
use crate::links::EditLinkBuilder;
use crate::progress::{NullSink, ProgressSink};
use crate::selection::{ItemIndex, ItemSelection, NoopSelectionHook, PerPage, SelectionHook};
use crate::settings::SettingsStore;

mod delay;

pub use delay::{DEFAULT_SAVE_DELAY_MS, FixedSaveDelay, SaveDelayPolicy};

/// Settings keys for the persisted pass state.
pub const RUNNING_KEY: &str = "remaster:batch:running";
pub const ITEMS_KEY: &str = "remaster:batch:items";
pub const CURSOR_KEY: &str = "remaster:batch:cursor";

/// Caller-facing options for starting a pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StartOptions {
    /// Comma-separated kind filter; empty or unrecognized falls back to the
    /// default pair.
    pub kinds: Option<String>,
    pub per_page: Option<PerPage>,
    pub page: Option<u32>,
    /// Restrict the selection to items tagged with this catalog.
    pub catalog: Option<String>,
    /// Comma-separated explicit id allow-list.
    pub only: Option<String>,
}

impl StartOptions {
    fn to_selection(&self) -> ItemSelection {
        ItemSelection {
            kinds: ItemKind::parse_list_or_default(self.kinds.as_deref().unwrap_or("")),
            status: ItemStatus::Published,
            per_page: self.per_page.unwrap_or_default(),
            page: self.page.unwrap_or(1).max(1),
            catalog: self.catalog.as_deref().and_then(CatalogSlug::new),
            only: self
                .only
                .as_deref()
                .map(parse_id_list)
                .unwrap_or_default(),
        }
    }
}

fn parse_id_list(raw: &str) -> Vec<ItemId> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<u64>().ok())
        .filter(|&id| id != 0)
        .map(ItemId::new)
        .collect()
}

/// Read-only snapshot of the pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStatus {
    pub running: bool,
    /// Zero-based index of the active item; -1 before the first item.
    pub cursor: i64,
    pub total: u64,
    /// Whole-percentage completion, 0 when no items are selected.
    pub progress: u8,
    /// Edit link of the item at the cursor, empty when no item is active.
    pub active: String,
}

/// Sequential progress tracker over an ordered list of item ids.
///
/// Owns its collaborators explicitly; nothing here reads process-global
/// state. Absent or malformed persisted values always decode to the idle
/// defaults.
pub struct BatchCursor {
    store: Arc<dyn SettingsStore>,
    index: Arc<dyn ItemIndex>,
    links: EditLinkBuilder,
    hook: Arc<dyn SelectionHook>,
    sink: Arc<dyn ProgressSink>,
    /// Serializes the cursor read-modify-write for in-process callers.
    advance: Mutex<()>,
}

impl fmt::Debug for BatchCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchCursor").finish_non_exhaustive()
    }
}

impl BatchCursor {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        index: Arc<dyn ItemIndex>,
        links: EditLinkBuilder,
    ) -> Self {
        Self {
            store,
            index,
            links,
            hook: Arc::new(NoopSelectionHook),
            sink: Arc::new(NullSink),
            advance: Mutex::new(()),
        }
    }

    /// Installs the deployment's selection customization hook.
    pub fn with_selection_hook(mut self, hook: Arc<dyn SelectionHook>) -> Self {
        self.hook = hook;
        self
    }

    /// Installs a diagnostic sink for pagination reports.
    pub fn with_progress_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Select items and begin a new pass, advancing to the first item.
    ///
    /// Returns the first item's edit link, or `None` when the selection is
    /// empty, in which case nothing is persisted. Any previous pass state is
    /// overwritten unconditionally.
    pub async fn start(&self, options: &StartOptions) -> Result<Option<String>> {
        let ids = self.select_items(options).await?;
        if ids.is_empty() {
            info!("Pass not started: selection matched no items");
            return Ok(None);
        }

        info!("Starting pass over {} items", ids.len());
        self.write_running(true).await?;
        self.write_items(&ids).await?;
        self.write_cursor(-1).await?;

        self.next().await
    }

    /// Unconditionally reset to idle. Safe to call when no pass is running.
    pub async fn stop(&self) -> Result<()> {
        info!("Stopping pass");
        self.write_running(false).await?;
        self.write_items(&[]).await?;
        self.write_cursor(-1).await?;
        Ok(())
    }

    pub async fn is_running(&self) -> Result<bool> {
        self.read_running().await
    }

    /// Pure read of the pass state.
    pub async fn status(&self) -> Result<BatchStatus> {
        let running = self.read_running().await?;
        let items = self.read_items().await?;
        let cursor = self.read_cursor().await?;
        let total = items.len() as u64;

        let active = item_at(&items, cursor)
            .map(|item| self.links.edit_link(item))
            .unwrap_or_default();

        Ok(BatchStatus {
            running,
            cursor,
            total,
            progress: progress_percent(cursor, total),
            active,
        })
    }

    /// Advance to the next item and return its edit link.
    ///
    /// Returns `None` once the list is exhausted; the transition that
    /// consumes the last item also clears the running flag. Further calls
    /// keep returning `None` without touching state.
    pub async fn next(&self) -> Result<Option<String>> {
        let _guard = self.advance.lock().await;

        let items = self.read_items().await?;
        let cursor = self.read_cursor().await?;
        let total = items.len() as i64;

        if cursor + 1 < total {
            let cursor = cursor + 1;
            self.write_cursor(cursor).await?;
            let item = items[cursor as usize];
            debug!("Advanced cursor to {} (item {})", cursor, item);
            return Ok(Some(self.links.edit_link(item)));
        }

        if cursor + 1 == total {
            info!("Pass complete after {} items", total);
            self.write_running(false).await?;
            return Ok(None);
        }

        // Already past the end; repeated calls are a no-op.
        Ok(None)
    }

    /// Edit-view link for `item`; empty string for the nil id.
    pub fn edit_link(&self, item: ItemId) -> String {
        self.links.edit_link(item)
    }

    /// Build and execute the selection behind a pass, reporting pagination
    /// through the diagnostic sink.
    pub async fn select_items(&self, options: &StartOptions) -> Result<Vec<ItemId>> {
        let mut selection = options.to_selection();
        self.hook.adjust(&mut selection);

        let page = self.index.select(&selection).await?;
        let total_pages = page.total_pages(selection.per_page);
        self.sink
            .page_progress(selection.page, total_pages, page.total_matches);
        debug!(
            "Selection matched {} items (page {}/{})",
            page.total_matches, selection.page, total_pages
        );

        Ok(page.ids)
    }

    async fn read_running(&self) -> Result<bool> {
        Ok(self
            .store
            .get(RUNNING_KEY)
            .await?
            .map(|raw| truthy(&raw))
            .unwrap_or(false))
    }

    async fn read_items(&self) -> Result<Vec<ItemId>> {
        Ok(self
            .store
            .get(ITEMS_KEY)
            .await?
            .and_then(|raw| serde_json::from_str::<Vec<u64>>(&raw).ok())
            .map(|ids| ids.into_iter().map(ItemId::new).collect())
            .unwrap_or_default())
    }

    async fn read_cursor(&self) -> Result<i64> {
        Ok(self
            .store
            .get(CURSOR_KEY)
            .await?
            .and_then(|raw| serde_json::from_str::<i64>(&raw).ok())
            .map(|cursor| cursor.max(-1))
            .unwrap_or(-1))
    }

    async fn write_running(&self, running: bool) -> Result<()> {
        self.store
            .set(RUNNING_KEY, serde_json::to_string(&running)?)
            .await
    }

    async fn write_items(&self, items: &[ItemId]) -> Result<()> {
        let raw: Vec<u64> = items.iter().map(ItemId::get).collect();
        self.store
            .set(ITEMS_KEY, serde_json::to_string(&raw)?)
            .await
    }

    async fn write_cursor(&self, cursor: i64) -> Result<()> {
        self.store
            .set(CURSOR_KEY, serde_json::to_string(&cursor)?)
            .await
    }
}

fn item_at(items: &[ItemId], cursor: i64) -> Option<ItemId> {
    if cursor < 0 {
        return None;
    }
    items
        .get(cursor as usize)
        .copied()
        .filter(|item| !item.is_nil())
}

/// round((cursor + 1) / total * 100); 0 when the pass is empty.
fn progress_percent(cursor: i64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = (cursor + 1).max(0) as f64;
    let percent = (done / total as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Coerces a stored raw value to the running flag. Host settings stores are
/// loosely typed; any non-empty truthy value counts as running.
fn truthy(raw: &str) -> bool {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Bool(flag)) => flag,
        Ok(Value::Null) => false,
        Ok(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Ok(Value::String(s)) => !matches!(s.trim(), "" | "0" | "false"),
        Ok(Value::Array(values)) => !values.is_empty(),
        Ok(Value::Object(_)) => true,
        Err(_) => !matches!(raw.trim(), "" | "0" | "false"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(-1, 0), 0);
        assert_eq!(progress_percent(-1, 4), 0);
        assert_eq!(progress_percent(0, 4), 25);
        assert_eq!(progress_percent(0, 3), 33);
        assert_eq!(progress_percent(1, 3), 67);
        assert_eq!(progress_percent(2, 3), 100);
        assert_eq!(progress_percent(3, 4), 100);
    }

    #[test]
    fn test_truthy_coercion() {
        assert!(truthy("true"));
        assert!(truthy("1"));
        assert!(truthy("\"yes\""));
        assert!(truthy("not-json"));

        assert!(!truthy("false"));
        assert!(!truthy("0"));
        assert!(!truthy("\"\""));
        assert!(!truthy("\"0\""));
        assert!(!truthy("null"));
        assert!(!truthy(""));
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(
            parse_id_list("5, 9 ,14"),
            vec![ItemId::new(5), ItemId::new(9), ItemId::new(14)]
        );
        assert_eq!(parse_id_list("0,abc, -2"), vec![]);
        assert_eq!(parse_id_list(""), vec![]);
    }

    #[test]
    fn test_item_at_bounds() {
        let items = vec![ItemId::new(5), ItemId::NIL, ItemId::new(14)];
        assert_eq!(item_at(&items, -1), None);
        assert_eq!(item_at(&items, 0), Some(ItemId::new(5)));
        assert_eq!(item_at(&items, 1), None);
        assert_eq!(item_at(&items, 3), None);
    }

    #[test]
    fn test_start_options_defaults() {
        let selection = StartOptions::default().to_selection();
        assert_eq!(selection.kinds, ItemKind::DEFAULT_PAIR.to_vec());
        assert_eq!(selection.status, ItemStatus::Published);
        assert_eq!(selection.per_page, PerPage::All);
        assert_eq!(selection.page, 1);
        assert_eq!(selection.catalog, None);
        assert!(selection.only.is_empty());
    }

    #[test]
    fn test_start_options_page_floor() {
        let options = StartOptions {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(options.to_selection().page, 1);
    }
}
