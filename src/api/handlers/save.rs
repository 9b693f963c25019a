//! Handler for the create-mapping endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::save::SaveUrlRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Stores a long URL and returns its short code.
///
/// # Endpoint
///
/// `POST /set`
///
/// # Request Body
///
/// ```json
/// { "long_url": "example.com/page", "custom_url": "promo" }
/// ```
///
/// # Response
///
/// The assigned code as a JSON string:
///
/// ```json
/// "promo"
/// ```
///
/// # Errors
///
/// - 400 if the URL or custom code is invalid
/// - 409 if the custom code is taken
/// - 500 if no unique code could be generated or the store failed
pub async fn save_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<SaveUrlRequest>,
) -> Result<Json<String>, AppError> {
    payload.validate()?;

    let mapping = state
        .url_service
        .save_url(&payload.long_url, payload.custom_url.as_deref())
        .await?;

    tracing::info!(code = %mapping.short_code, long_url = %mapping.long_url, "Short URL created");

    Ok(Json(mapping.short_code))
}
