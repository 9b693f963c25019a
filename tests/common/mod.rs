#![allow(dead_code)]

use async_trait::async_trait;
use snaplink::application::services::UrlService;
use snaplink::domain::code_generator::CodeGenerator;
use snaplink::domain::entities::{NewUrlMapping, UrlMapping};
use snaplink::domain::error::UrlStoreError;
use snaplink::domain::repositories::UrlRepository;
use dashmap::DashMap;
use snaplink::infrastructure::cache::{CacheError, CacheResult, CacheService, NullCache};
use snaplink::infrastructure::persistence::MemoryUrlRepository;
use snaplink::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Builds a service over a fresh in-memory store with random codes.
pub fn memory_service() -> (Arc<UrlService>, Arc<MemoryUrlRepository>) {
    let repo = Arc::new(MemoryUrlRepository::new());
    let service = UrlService::with_random_codes(repo.clone());
    (Arc::new(service), repo)
}

pub fn create_test_state() -> AppState {
    let (service, _repo) = memory_service();
    AppState::new(service, Arc::new(NullCache::new()))
}

pub fn state_with_repository(repo: Arc<dyn UrlRepository>) -> AppState {
    let service = UrlService::with_random_codes(repo);
    AppState::new(Arc::new(service), Arc::new(NullCache::new()))
}

/// Generator that hands out the same code on every call.
pub struct FixedCodeGenerator(pub &'static str);

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self, _length: usize) -> String {
        self.0.to_string()
    }
}

/// Repository whose every call fails like an unreachable database.
pub struct UnavailableRepository;

#[async_trait]
impl UrlRepository for UnavailableRepository {
    async fn insert_if_absent(
        &self,
        _mapping: NewUrlMapping,
    ) -> Result<Option<UrlMapping>, UrlStoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn exists(&self, _short_code: &str) -> Result<bool, UrlStoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_long_url(&self, _short_code: &str) -> Result<Option<String>, UrlStoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_by_code(&self, _short_code: &str) -> Result<Option<UrlMapping>, UrlStoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn count(&self) -> Result<i64, UrlStoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn ping(&self) -> Result<(), UrlStoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

/// In-process cache that reports every write on a channel.
pub struct StubCache {
    entries: DashMap<String, String>,
    failing: bool,
    writes: mpsc::UnboundedSender<(String, String)>,
}

impl StubCache {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(String, String)>) {
        let (writes, rx) = mpsc::unbounded_channel();
        let cache = Self {
            entries: DashMap::new(),
            failing: false,
            writes,
        };
        (cache, rx)
    }

    /// A cache whose reads always fail.
    pub fn failing() -> (Self, mpsc::UnboundedReceiver<(String, String)>) {
        let (mut cache, rx) = Self::new();
        cache.failing = true;
        (cache, rx)
    }

    pub fn with_entry(self, code: &str, long_url: &str) -> Self {
        self.entries.insert(code.to_string(), long_url.to_string());
        self
    }
}

#[async_trait]
impl CacheService for StubCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        if self.failing {
            return Err(CacheError::OperationError("cache offline".to_string()));
        }
        Ok(self.entries.get(short_code).map(|e| e.value().clone()))
    }

    async fn set_url(
        &self,
        short_code: &str,
        long_url: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        self.entries
            .insert(short_code.to_string(), long_url.to_string());
        let _ = self
            .writes
            .send((short_code.to_string(), long_url.to_string()));
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.failing
    }

    fn backend_name(&self) -> &'static str {
        "stub"
    }
}
