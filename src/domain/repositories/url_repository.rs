//! Repository trait for URL mapping persistence.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::error::UrlStoreError;
use async_trait::async_trait;

/// Persistence contract over the single `urls` relation.
///
/// Implementations must guarantee that `short_code` stays unique under
/// concurrent writers. The guarantee lives in [`Self::insert_if_absent`];
/// [`Self::exists`] is advisory and may be stale by the time the caller acts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Atomically inserts the mapping unless its code is already taken.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlMapping))` with the stored row when the insert happened
    /// - `Ok(None)` when another mapping already owns the code
    ///
    /// # Errors
    ///
    /// Returns [`UrlStoreError::Store`] on database errors.
    async fn insert_if_absent(
        &self,
        new_mapping: NewUrlMapping,
    ) -> Result<Option<UrlMapping>, UrlStoreError>;

    /// Checks whether a mapping exists for the code.
    ///
    /// # Errors
    ///
    /// Returns [`UrlStoreError::Store`] on database errors.
    async fn exists(&self, short_code: &str) -> Result<bool, UrlStoreError>;

    /// Looks up the long URL for a code.
    ///
    /// # Errors
    ///
    /// Returns [`UrlStoreError::Store`] on database errors.
    async fn find_long_url(&self, short_code: &str) -> Result<Option<String>, UrlStoreError>;

    /// Looks up the full mapping for a code.
    ///
    /// # Errors
    ///
    /// Returns [`UrlStoreError::Store`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, UrlStoreError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`UrlStoreError::Store`] on database errors.
    async fn count(&self) -> Result<i64, UrlStoreError>;

    /// Verifies the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`UrlStoreError::Store`] when the store cannot be reached.
    async fn ping(&self) -> Result<(), UrlStoreError>;
}
