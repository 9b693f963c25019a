//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its long URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Check cache for the code
/// 2. On miss, resolve through the URL store
/// 3. Asynchronously populate the cache
/// 4. Return 308 Permanent Redirect
///
/// Cache errors are logged and fall back to the store.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let long_url = match state.cache.get_url(&code).await {
        Ok(Some(cached_url)) => cached_url,
        Ok(None) => {
            let long_url = state.url_service.resolve(&code).await?;

            let cache = state.cache.clone();
            let cache_code = code.clone();
            let cache_url = long_url.clone();
            tokio::spawn(async move {
                if let Err(e) = cache.set_url(&cache_code, &cache_url, None).await {
                    warn!("Failed to cache URL: {}", e);
                }
            });

            long_url
        }
        Err(e) => {
            warn!("Cache error: {}", e);
            state.url_service.resolve(&code).await?
        }
    };

    debug!(code = %code, "Redirecting to {}", long_url);

    Ok(Redirect::permanent(&long_url))
}
