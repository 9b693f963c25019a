//! DTOs for the create-mapping endpoint.

use serde::Deserialize;
use validator::Validate;

/// Request to shorten a URL.
///
/// `custom_url` is the caller-chosen short code (at most 64 characters,
/// further checked by the URL store); `custom_code` is accepted as
/// an alias. Missing or empty means a code is generated.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveUrlRequest {
    /// The URL to shorten. A scheme is optional.
    #[validate(length(min = 1, max = 2048, message = "long_url must be 1-2048 characters"))]
    pub long_url: String,

    #[serde(default, alias = "custom_code")]
    #[validate(length(max = 64, message = "custom code is too long"))]
    pub custom_url: Option<String>,
}
