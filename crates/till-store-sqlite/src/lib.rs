//! SQLite backend for the till retail store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Referential integrity is
//! enforced by the engine (`PRAGMA foreign_keys = ON`); the audit
//! observers from `till-core` run inside the same transaction as the
//! triggering write.

mod backup;
mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
