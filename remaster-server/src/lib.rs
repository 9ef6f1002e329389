//! Remaster server: HTTP surface and command-line drivers for batch
//! re-edit passes.

#![allow(missing_docs)]

pub mod batch_cli;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;
