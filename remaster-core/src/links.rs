//! Edit-link building and the active-client request marker.

use std::collections::HashMap;

use url::Url;

use remaster_model::ItemId;

use crate::{RemasterError, Result};

/// Query parameter marking an edit view as the active target of a running
/// pass. The embedded editor script looks for it on page load.
pub const ACTIVE_ITEM_PARAM: &str = "remaster_item";

/// Builds edit-view URLs against the deployment's public base URL.
#[derive(Debug, Clone)]
pub struct EditLinkBuilder {
    base: Url,
}

impl EditLinkBuilder {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base)
            .map_err(|e| RemasterError::InvalidLinkBase(format!("{base}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(RemasterError::InvalidLinkBase(format!(
                "{base} cannot carry a path"
            )));
        }
        Ok(Self { base })
    }

    /// Edit-view URL for `item`, carrying the active-client marker. The nil
    /// id yields an empty string.
    pub fn edit_link(&self, item: ItemId) -> String {
        if item.is_nil() {
            return String::new();
        }

        let id = item.to_string();
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["admin", "media", id.as_str(), "edit"]);
        }
        url.query_pairs_mut().append_pair(ACTIVE_ITEM_PARAM, &id);
        url.to_string()
    }
}

/// Extracts and sanitizes the active-client marker from a request's query
/// parameters. Returns the id only when present and non-zero.
pub fn active_item_param(params: &HashMap<String, String>) -> Option<ItemId> {
    let raw = params.get(ACTIVE_ITEM_PARAM)?;
    let id = raw.trim().parse::<u64>().ok()?;
    if id == 0 { None } else { Some(ItemId::new(id)) }
}
