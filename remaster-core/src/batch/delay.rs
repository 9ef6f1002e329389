use remaster_model::ItemId;

/// Delay the embedded editor script waits before saving the active item.
pub const DEFAULT_SAVE_DELAY_MS: u64 = 2_000;

/// Save-delay policy for the client bridge payload, parameterized by the
/// item under edit.
pub trait SaveDelayPolicy: Send + Sync {
    fn save_delay_ms(&self, item: ItemId) -> u64;
}

/// Constant delay for every item.
#[derive(Debug, Clone, Copy)]
pub struct FixedSaveDelay(pub u64);

impl Default for FixedSaveDelay {
    fn default() -> Self {
        FixedSaveDelay(DEFAULT_SAVE_DELAY_MS)
    }
}

impl SaveDelayPolicy for FixedSaveDelay {
    fn save_delay_ms(&self, _item: ItemId) -> u64 {
        self.0
    }
}
