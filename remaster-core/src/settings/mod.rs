//! Key-value persistence boundary for batch pass state.
//!
//! The tracker stores its three state fields as independent keyed values in
//! whatever settings backend the deployment provides. Values are opaque JSON
//! strings; typed encode/decode stays with the caller.

use async_trait::async_trait;

use crate::Result;

mod memory;
#[cfg(feature = "database")]
mod redis_store;

pub use memory::MemorySettingsStore;
#[cfg(feature = "database")]
pub use redis_store::RedisSettingsStore;

/// Process-wide key-value settings store. Presumed synchronous-per-call and
/// durable across requests; each key is set independently, no transactions.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;
}
