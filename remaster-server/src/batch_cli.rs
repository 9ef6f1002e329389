//! Non-interactive batch driver for the command line.

use remaster_core::batch::{BatchCursor, StartOptions};
use remaster_core::progress::ProgressSink;

/// Line-oriented pagination reporter for command-line runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSink;

impl ProgressSink for LineSink {
    fn page_progress(&self, page: u32, total_pages: u32, total_matches: u64) {
        println!("Selection page {page}/{total_pages} ({total_matches} items total)");
    }
}

/// Start a pass and step it to completion, printing each item's edit link.
/// Returns the number of items walked.
pub async fn run_to_completion(
    cursor: &BatchCursor,
    options: &StartOptions,
) -> anyhow::Result<u64> {
    let Some(first) = cursor.start(options).await? else {
        println!("No items matched the selection; nothing to do.");
        return Ok(0);
    };

    let mut processed: u64 = 1;
    println!("[{:>3}%] {first}", cursor.status().await?.progress);

    while let Some(link) = cursor.next().await? {
        processed += 1;
        println!("[{:>3}%] {link}", cursor.status().await?.progress);
    }

    println!("Pass complete: {processed} items");
    Ok(processed)
}
