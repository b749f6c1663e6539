//! Category list kept as a JSON array in the preference store.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::errors::LedgerError;
use crate::storage::PreferenceStore;

const CATEGORIES_KEY: &str = "categories";

/// Returned until the user adds a category of their own
pub const DEFAULT_CATEGORIES: [&str; 4] = ["食費", "交通費", "日用品", "光熱費"];

#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn PreferenceStore>,
    /// Serializes read-modify-write of the list across handler clones
    write_lock: Arc<Mutex<()>>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn defaults() -> Vec<String> {
        DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, LedgerError> {
        let Some(raw) = self.store.get_value(CATEGORIES_KEY).await? else {
            return Ok(Self::defaults());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(categories) => Ok(categories),
            Err(e) => {
                warn!("Stored category list is unreadable, using defaults: {}", e);
                Ok(Self::defaults())
            }
        }
    }

    /// Append a category, returning the resulting list. Duplicates are a no-op.
    pub async fn add_category(&self, name: &str) -> Result<Vec<String>, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyCategory);
        }

        let _guard = self.write_lock.lock().await;
        let mut categories = self.list_categories().await?;
        if categories.iter().any(|c| c == name) {
            return Ok(categories);
        }

        categories.push(name.to_string());
        let encoded = serde_json::to_string(&categories).map_err(anyhow::Error::from)?;
        self.store.put_value(CATEGORIES_KEY, &encoded).await?;
        info!("Added category '{}'", name);

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        values: std::sync::Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl PreferenceStore for MemoryStore {
        async fn get_value(&self, key: &str) -> anyhow::Result<Option<String>> {
            let value = self.values.lock().unwrap().get(key).cloned();
            tokio::task::yield_now().await;
            Ok(value)
        }

        async fn put_value(&self, key: &str, value: &str) -> anyhow::Result<()> {
            self.values.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn setup_test() -> (CategoryService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (CategoryService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_defaults_when_absent() {
        let (service, _) = setup_test();
        let categories = service.list_categories().await.unwrap();
        assert_eq!(categories, vec!["食費", "交通費", "日用品", "光熱費"]);
    }

    #[tokio::test]
    async fn test_add_persists_json_array() {
        let (service, store) = setup_test();

        let categories = service.add_category("  医療費 ").await.unwrap();
        assert_eq!(categories.last().map(String::as_str), Some("医療費"));
        assert_eq!(categories.len(), 5);

        let raw = store.get_value("categories").await.unwrap().unwrap();
        let stored: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, categories);
        assert_eq!(service.list_categories().await.unwrap(), categories);
    }

    #[tokio::test]
    async fn test_add_duplicate_is_ignored() {
        let (service, store) = setup_test();

        let categories = service.add_category("食費").await.unwrap();
        assert_eq!(categories.len(), 4);
        assert!(store.get_value("categories").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_blank_rejected() {
        let (service, _) = setup_test();
        assert!(matches!(service.add_category("   ").await, Err(LedgerError::EmptyCategory)));
    }

    #[tokio::test]
    async fn test_concurrent_adds_keep_every_category() {
        let (service, _) = setup_test();
        let names: Vec<String> = (0..8).map(|i| format!("追加{}", i)).collect();

        let mut adds = tokio::task::JoinSet::new();
        for name in names.clone() {
            let service = service.clone();
            adds.spawn(async move { service.add_category(&name).await });
        }
        while let Some(result) = adds.join_next().await {
            result.unwrap().unwrap();
        }

        let categories = service.list_categories().await.unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len() + names.len());
        assert!(names.iter().all(|n| categories.contains(n)));
    }

    #[tokio::test]
    async fn test_unreadable_value_falls_back() {
        let (service, store) = setup_test();
        store.put_value("categories", "not json").await.unwrap();

        assert_eq!(service.list_categories().await.unwrap().len(), DEFAULT_CATEGORIES.len());
    }
}
