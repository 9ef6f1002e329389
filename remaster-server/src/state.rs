use std::{fmt, sync::Arc};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use remaster_core::batch::{BatchCursor, FixedSaveDelay, SaveDelayPolicy};
use remaster_core::links::EditLinkBuilder;
use remaster_core::progress::{NullSink, ProgressSink};
use remaster_core::selection::{MemoryItemIndex, PgItemIndex};
use remaster_core::settings::{MemorySettingsStore, RedisSettingsStore};

use crate::config::Config;

/// Item count for the dev-mode seeded index.
const DEV_SEED_ITEMS: u64 = 24;

#[derive(Clone)]
pub struct AppState {
    pub cursor: Arc<BatchCursor>,
    pub save_delay: Arc<dyn SaveDelayPolicy>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub async fn from_config(config: Arc<Config>) -> anyhow::Result<Self> {
        let cursor = build_cursor(&config, Arc::new(NullSink)).await?;

        Ok(Self {
            cursor: Arc::new(cursor),
            save_delay: Arc::new(FixedSaveDelay(config.save_delay_ms)),
            config,
        })
    }
}

/// Wire a [`BatchCursor`] against the configured backends. Dev mode swaps in
/// the in-memory store and a seeded index so the surface runs without
/// Postgres or Redis.
pub async fn build_cursor(
    config: &Config,
    sink: Arc<dyn ProgressSink>,
) -> anyhow::Result<BatchCursor> {
    let links = EditLinkBuilder::new(&config.public_base_url)?;

    if config.dev_mode {
        info!("Dev mode: using in-memory settings store and seeded item index");
        let store = Arc::new(MemorySettingsStore::new());
        let index = Arc::new(MemoryItemIndex::seeded(DEV_SEED_ITEMS));
        return Ok(BatchCursor::new(store, index, links).with_progress_sink(sink));
    }

    let store = Arc::new(RedisSettingsStore::new(config.require_redis_url()?).await?);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.require_database_url()?)
        .await
        .context("connecting to Postgres")?;
    let index = Arc::new(PgItemIndex::new(pool).await?);

    Ok(BatchCursor::new(store, index, links).with_progress_sink(sink))
}
