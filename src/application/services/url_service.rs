//! URL mapping creation and resolution service.

use std::sync::Arc;

use crate::domain::code_generator::CodeGenerator;
use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::error::UrlStoreError;
use crate::domain::repositories::UrlRepository;
use crate::utils::code_generator::{
    DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS, RandomCodeGenerator, validate_custom_code,
};
use crate::utils::url_normalizer;

/// Service for saving and resolving short codes.
///
/// Normalizes long URLs, assigns caller-chosen or generated codes, and
/// relies on [`UrlRepository::insert_if_absent`] to keep codes unique
/// across concurrent writers. The service itself holds no locks and does
/// not log; callers attach context to returned errors.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    generator: Arc<dyn CodeGenerator>,
    code_length: usize,
    max_attempts: usize,
}

impl UrlService {
    /// Creates a service with the default code length and retry budget.
    pub fn new(repository: Arc<dyn UrlRepository>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            repository,
            generator,
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Creates a service backed by [`RandomCodeGenerator`].
    pub fn with_random_codes(repository: Arc<dyn UrlRepository>) -> Self {
        Self::new(repository, Arc::new(RandomCodeGenerator))
    }

    /// Sets the length of generated codes.
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    /// Sets the number of generation attempts before giving up.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Normalizes a long URL, supplying `http://` when no scheme is given.
    ///
    /// # Errors
    ///
    /// Returns [`UrlStoreError::InvalidUrl`] when the result is not an
    /// absolute http(s) URL.
    pub fn normalize_url(&self, input: &str) -> Result<String, UrlStoreError> {
        url_normalizer::normalize_url(input).map_err(|e| UrlStoreError::InvalidUrl(e.to_string()))
    }

    /// Stores a mapping for `long_url` and returns it.
    ///
    /// A non-empty `custom_code` is used verbatim; `None` or an empty string
    /// selects a generated code.
    ///
    /// # Errors
    ///
    /// - [`UrlStoreError::InvalidUrl`] if the URL cannot be normalized
    /// - [`UrlStoreError::InvalidCode`] if the custom code is unusable
    /// - [`UrlStoreError::CodeAlreadyExists`] if the custom code is taken
    /// - [`UrlStoreError::GenerationExhausted`] if every generated candidate collided
    /// - [`UrlStoreError::Store`] on persistence failures
    pub async fn save_url(
        &self,
        long_url: &str,
        custom_code: Option<&str>,
    ) -> Result<UrlMapping, UrlStoreError> {
        let long_url = self.normalize_url(long_url)?;

        match custom_code.filter(|code| !code.is_empty()) {
            Some(code) => self.save_custom(long_url, code).await,
            None => self.save_generated(long_url).await,
        }
    }

    /// Checks whether a mapping exists for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlStoreError::Store`] on persistence failures.
    pub async fn code_exists(&self, code: &str) -> Result<bool, UrlStoreError> {
        self.repository.exists(code).await
    }

    /// Returns the long URL mapped to `code`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlStoreError::CodeNotFound`] if no mapping exists and
    /// [`UrlStoreError::Store`] on persistence failures.
    pub async fn resolve(&self, code: &str) -> Result<String, UrlStoreError> {
        self.repository
            .find_long_url(code)
            .await?
            .ok_or_else(|| UrlStoreError::CodeNotFound(code.to_string()))
    }

    /// Returns the full mapping for `code`.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn get_mapping(&self, code: &str) -> Result<UrlMapping, UrlStoreError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| UrlStoreError::CodeNotFound(code.to_string()))
    }

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`UrlStoreError::Store`] on persistence failures.
    pub async fn count(&self) -> Result<i64, UrlStoreError> {
        self.repository.count().await
    }

    /// Checks that the underlying store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`UrlStoreError::Store`] when it is not.
    pub async fn ping(&self) -> Result<(), UrlStoreError> {
        self.repository.ping().await
    }

    async fn save_custom(&self, long_url: String, code: &str) -> Result<UrlMapping, UrlStoreError> {
        validate_custom_code(code)?;

        if self.repository.exists(code).await? {
            return Err(UrlStoreError::CodeAlreadyExists(code.to_string()));
        }

        // A concurrent writer may claim the code between the check and the insert.
        self.repository
            .insert_if_absent(NewUrlMapping::new(code, long_url))
            .await?
            .ok_or_else(|| UrlStoreError::CodeAlreadyExists(code.to_string()))
    }

    /// Tries up to `max_attempts` fresh candidates. A candidate lost to a
    /// concurrent insert counts as a collision.
    async fn save_generated(&self, long_url: String) -> Result<UrlMapping, UrlStoreError> {
        for _ in 0..self.max_attempts {
            let candidate = self.generator.generate(self.code_length);

            if self.repository.exists(&candidate).await? {
                continue;
            }

            if let Some(mapping) = self
                .repository
                .insert_if_absent(NewUrlMapping::new(candidate, long_url.clone()))
                .await?
            {
                return Ok(mapping);
            }
        }

        Err(UrlStoreError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}
