//! # Storage Traits
//!
//! Abstractions the domain layer depends on where more than one backing
//! store is useful (SQLite in production, in-memory maps in tests).

use anyhow::Result;
use async_trait::async_trait;

/// Simple string key/value store for client preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Retrieve a value by its key
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, overwriting any existing value for the same key
    async fn put_value(&self, key: &str, value: &str) -> Result<()>;
}
