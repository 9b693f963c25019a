//! URL mapping entity.

use chrono::{DateTime, Utc};

/// A persisted association between a short code and a long URL.
///
/// `short_code` is globally unique. `long_url` is stored in normalized form
/// and may appear in any number of mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(short_code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            short_code,
            long_url,
            created_at,
        }
    }
}

/// Input data for creating a new mapping.
///
/// `created_at` is assigned by the store at insertion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub short_code: String,
    pub long_url: String,
}

impl NewUrlMapping {
    pub fn new(short_code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            long_url: long_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_mapping_creation() {
        let now = Utc::now();
        let mapping = UrlMapping::new(
            "abc123".to_string(),
            "https://example.com/".to_string(),
            now,
        );

        assert_eq!(mapping.short_code, "abc123");
        assert_eq!(mapping.long_url, "https://example.com/");
        assert_eq!(mapping.created_at, now);
    }

    #[test]
    fn test_new_url_mapping_accepts_str_and_string() {
        let new_mapping = NewUrlMapping::new("xyz789", String::from("https://rust-lang.org/"));

        assert_eq!(new_mapping.short_code, "xyz789");
        assert_eq!(new_mapping.long_url, "https://rust-lang.org/");
    }
}
