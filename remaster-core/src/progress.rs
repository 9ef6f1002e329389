//! Diagnostic sink for non-interactive batch drivers.

/// Receives one pagination report per executed selection. Interactive
/// callers keep the default [`NullSink`]; a command-line driver installs a
/// line-oriented sink instead.
pub trait ProgressSink: Send + Sync {
    fn page_progress(&self, page: u32, total_pages: u32, total_matches: u64);
}

/// Default sink; discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn page_progress(&self, _page: u32, _total_pages: u32, _total_matches: u64) {}
}
