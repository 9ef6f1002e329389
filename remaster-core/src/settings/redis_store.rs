use std::fmt;

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use tracing::{debug, info};

use super::SettingsStore;
use crate::{RemasterError, Result};

/// Redis-backed settings store.
#[derive(Clone)]
pub struct RedisSettingsStore {
    conn: ConnectionManager,
}

impl fmt::Debug for RedisSettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSettingsStore")
            .field("connection", &"ConnectionManager")
            .finish()
    }
}

impl RedisSettingsStore {
    pub async fn new(redis_url: &str) -> Result<Self> {
        info!("Connecting to Redis settings store at {}", redis_url);

        let client = redis::Client::open(redis_url).map_err(|e| {
            RemasterError::Store(format!("Failed to create Redis client: {e}"))
        })?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| RemasterError::Store(format!("Failed to connect to Redis: {e}")))?;

        info!("Successfully connected to Redis settings store");

        Ok(Self { conn })
    }
}

#[async_trait]
impl SettingsStore for RedisSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        debug!("Settings GET: {}", key);

        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| RemasterError::Store(format!("Redis GET failed: {e}")))?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        debug!("Settings SET: {}", key);

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| RemasterError::Store(format!("Redis SET failed: {e}")))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        debug!("Settings DELETE: {}", key);

        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| RemasterError::Store(format!("Redis DEL failed: {e}")))?;

        Ok(())
    }
}
