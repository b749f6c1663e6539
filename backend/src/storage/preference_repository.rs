use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::storage::connection::DbConnection;
use crate::storage::traits::PreferenceStore;

/// SQLite-backed preference store over the `preferences` table
#[derive(Clone)]
pub struct PreferenceRepository {
    db: DbConnection,
}

impl PreferenceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferenceStore for PreferenceRepository {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO preferences (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}
