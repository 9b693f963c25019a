//! Error taxonomy of the URL store.
//!
//! These errors describe what went wrong in domain terms. Translation into
//! HTTP status codes happens at the API boundary in [`crate::error::AppError`].

/// Errors returned by URL store operations.
#[derive(Debug, thiserror::Error)]
pub enum UrlStoreError {
    /// The input could not be normalized into an absolute http(s) URL.
    #[error("invalid long url: {0}")]
    InvalidUrl(String),

    /// A caller-supplied short code is not usable as a path segment.
    #[error("invalid custom code '{code}': {reason}")]
    InvalidCode { code: String, reason: String },

    /// The caller-supplied short code is already mapped.
    #[error("short code '{0}' already exists")]
    CodeAlreadyExists(String),

    /// Every generated candidate collided with an existing mapping.
    #[error("can't generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    /// No mapping exists for the requested short code.
    #[error("short code '{0}' doesn't exist")]
    CodeNotFound(String),

    /// The persistence layer failed.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl UrlStoreError {
    /// Returns true for failures caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_)
                | Self::InvalidCode { .. }
                | Self::CodeAlreadyExists(_)
                | Self::CodeNotFound(_)
        )
    }
}
