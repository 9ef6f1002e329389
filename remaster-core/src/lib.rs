//! # Remaster Core
//!
//! Core library for the Remaster batch re-edit platform: the pass cursor
//! state machine, selection query construction, and the persistence
//! boundaries the tracker runs against.
//!
//! ## Overview
//!
//! `remaster-core` provides:
//!
//! - **Batch passes**: a sequential cursor over an ordered list of content
//!   items, with start/stop/status/next operations
//! - **Selection queries**: kind/status/catalog/allow-list filters with page
//!   arithmetic, behind a pluggable index boundary
//! - **Settings persistence**: a key-value store abstraction with Redis and
//!   in-memory adapters
//! - **Edit links**: URL building for the editor UI, including the
//!   active-client request marker
//!
//! ## Feature Flags
//!
//! - `database`: enables the Postgres item index and the Redis settings
//!   store (on by default)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Batch pass cursor and its persisted state
pub mod batch;

/// Error types and error handling utilities
pub mod error;

/// Edit-link building and the active-client marker
pub mod links;

/// Diagnostic sink for non-interactive drivers
pub mod progress;

/// Selection query construction and the item index boundary
pub mod selection;

/// Key-value settings persistence boundary
pub mod settings;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use batch::{BatchCursor, BatchStatus, StartOptions};
pub use error::{RemasterError, Result};
