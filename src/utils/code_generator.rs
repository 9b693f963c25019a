//! Short code generation and validation utilities.
//!
//! Provides uniform random code generation over a URL-safe alphabet and
//! validation for caller-supplied custom codes.

use rand::Rng;

use crate::domain::code_generator::CodeGenerator;
use crate::domain::error::UrlStoreError;

/// Characters generated codes are drawn from.
pub const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generation attempts before giving up with [`UrlStoreError::GenerationExhausted`].
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Longest custom code accepted.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 64;

/// Reserved codes that cannot be used as short links.
///
/// These match the service's own routes.
const RESERVED_CODES: &[&str] = &["set", "health", "api"];

/// Generates codes with the thread-local CSPRNG.
///
/// # Examples
///
/// ```
/// use snaplink::domain::code_generator::CodeGenerator;
/// use snaplink::utils::code_generator::RandomCodeGenerator;
///
/// let code = RandomCodeGenerator.generate(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        generate_code(length)
    }
}

/// Generates a random code of `length` characters from [`ALPHABET`].
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route name
///
/// Codes are case-sensitive; `Promo` and `promo` are different codes.
///
/// # Errors
///
/// Returns [`UrlStoreError::InvalidCode`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), UrlStoreError> {
    let invalid = |reason: &str| UrlStoreError::InvalidCode {
        code: code.to_string(),
        reason: reason.to_string(),
    };

    if code.is_empty() || code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(invalid("must be 1-64 characters"));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(invalid(
            "can only contain letters, digits, hyphens and underscores",
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(invalid("this code is reserved"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_62_unique_chars() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(ALPHABET.len(), 62);
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_code_has_requested_length() {
        for length in [1, 6, 12, 32] {
            assert_eq!(generate_code(length).len(), length);
        }
    }

    #[test]
    fn test_generate_code_zero_length_is_empty() {
        assert!(generate_code(0).is_empty());
    }

    #[test]
    fn test_generate_code_uses_alphabet_only() {
        for _ in 0..200 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<_> = (0..1000).map(|_| generate_code(12)).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_random_generator_covers_alphabet() {
        let seen: HashSet<char> = (0..2000)
            .flat_map(|_| RandomCodeGenerator.generate(DEFAULT_CODE_LENGTH).into_bytes())
            .map(char::from)
            .collect();

        // 12000 uniform draws over 62 symbols miss one with negligible probability.
        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn test_validate_simple_code() {
        assert!(validate_custom_code("abc123").is_ok());
    }

    #[test]
    fn test_validate_mixed_case_and_separators() {
        assert!(validate_custom_code("My_Promo-2025").is_ok());
    }

    #[test]
    fn test_validate_single_char() {
        assert!(validate_custom_code("x").is_ok());
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(validate_custom_code(&"a".repeat(MAX_CUSTOM_CODE_LENGTH)).is_ok());
        assert!(validate_custom_code(&"a".repeat(MAX_CUSTOM_CODE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_empty_string() {
        let err = validate_custom_code("").unwrap_err();
        assert!(err.to_string().contains("1-64 characters"));
    }

    #[test]
    fn test_validate_rejects_path_characters() {
        for code in ["a/b", "a?b", "a#b", "a b", "ünï", "%41"] {
            let result = validate_custom_code(code);
            assert!(
                matches!(result, Err(UrlStoreError::InvalidCode { .. })),
                "'{code}' should be invalid"
            );
        }
    }

    #[test]
    fn test_validate_all_reserved_codes() {
        for &reserved in RESERVED_CODES {
            let result = validate_custom_code(reserved);
            assert!(
                result.is_err(),
                "Reserved code '{}' should be invalid",
                reserved
            );
        }
    }

    #[test]
    fn test_reserved_check_is_case_sensitive() {
        assert!(validate_custom_code("Health").is_ok());
    }
}
