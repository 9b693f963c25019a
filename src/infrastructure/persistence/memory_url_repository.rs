//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::error::UrlStoreError;
use crate::domain::repositories::UrlRepository;

/// Process-local repository backed by a [`DashMap`].
///
/// The map's entry API locks the shard owning the key, which makes
/// [`UrlRepository::insert_if_absent`] atomic with respect to other writers.
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryUrlRepository {
    storage: DashMap<String, UrlMapping>,
}

impl MemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates an empty repository with room for `capacity` mappings.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn insert_if_absent(
        &self,
        new_mapping: NewUrlMapping,
    ) -> Result<Option<UrlMapping>, UrlStoreError> {
        match self.storage.entry(new_mapping.short_code) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                let mapping = UrlMapping::new(slot.key().clone(), new_mapping.long_url, Utc::now());
                slot.insert(mapping.clone());
                Ok(Some(mapping))
            }
        }
    }

    async fn exists(&self, short_code: &str) -> Result<bool, UrlStoreError> {
        Ok(self.storage.contains_key(short_code))
    }

    async fn find_long_url(&self, short_code: &str) -> Result<Option<String>, UrlStoreError> {
        Ok(self
            .storage
            .get(short_code)
            .map(|entry| entry.long_url.clone()))
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, UrlStoreError> {
        Ok(self
            .storage
            .get(short_code)
            .map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> Result<i64, UrlStoreError> {
        Ok(self.storage.len() as i64)
    }

    async fn ping(&self) -> Result<(), UrlStoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryUrlRepository::new();

        let inserted = repo
            .insert_if_absent(NewUrlMapping::new("abc123", "https://example.com/"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(inserted.short_code, "abc123");

        assert!(repo.exists("abc123").await.unwrap());
        assert_eq!(
            repo.find_long_url("abc123").await.unwrap().as_deref(),
            Some("https://example.com/")
        );
        assert_eq!(repo.find_by_code("abc123").await.unwrap(), Some(inserted));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_taken_code_keeps_original() {
        let repo = MemoryUrlRepository::new();
        repo.insert_if_absent(NewUrlMapping::new("abc123", "https://first.com/"))
            .await
            .unwrap();

        let second = repo
            .insert_if_absent(NewUrlMapping::new("abc123", "https://second.com/"))
            .await
            .unwrap();

        assert!(second.is_none());
        assert_eq!(
            repo.find_long_url("abc123").await.unwrap().as_deref(),
            Some("https://first.com/")
        );
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_codes_are_case_sensitive() {
        let repo = MemoryUrlRepository::new();
        repo.insert_if_absent(NewUrlMapping::new("AbC", "https://example.com/"))
            .await
            .unwrap();

        assert!(repo.exists("AbC").await.unwrap());
        assert!(!repo.exists("abc").await.unwrap());
        assert!(repo.find_long_url("ABC").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_code() {
        let repo = MemoryUrlRepository::with_capacity(16);

        assert!(!repo.exists("nope").await.unwrap());
        assert!(repo.find_long_url("nope").await.unwrap().is_none());
        assert!(repo.find_by_code("nope").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_of_same_code_have_one_winner() {
        let repo = Arc::new(MemoryUrlRepository::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert_if_absent(NewUrlMapping::new(
                        "shared",
                        format!("https://example.com/{i}"),
                    ))
                    .await
                    .unwrap()
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_some() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
