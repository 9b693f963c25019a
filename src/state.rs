//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(url_service: Arc<UrlService>, cache: Arc<dyn CacheService>) -> Self {
        Self { url_service, cache }
    }
}
