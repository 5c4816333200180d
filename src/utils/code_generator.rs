//! Short code generation and validation.
//!
//! Generated codes are random draws over a lowercase alphanumeric alphabet;
//! custom aliases are validated for pattern, length, and reserved words.
//! Neither path holds state: uniqueness is the store's job.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Alphabet for generated codes. Lowercase alphanumeric only, so codes are
/// case-insensitive-safe in URLs and logs.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Bounds for the configured generated-code length.
pub const MIN_CODE_LENGTH: usize = 4;
pub const MAX_CODE_LENGTH: usize = 8;

/// Bounds for user-provided aliases.
const MIN_ALIAS_LENGTH: usize = 4;
const MAX_ALIAS_LENGTH: usize = 32;

/// Route names that cannot be used as aliases to prevent routing conflicts.
const RESERVED_CODES: &[&str] = &["new", "me", "login", "register", "health", "api", "static"];

/// Lowercase alphanumeric with interior hyphens.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").unwrap());

/// Generates a random short code of the given length.
///
/// The caller is expected to pass a length within
/// [`MIN_CODE_LENGTH`]..=[`MAX_CODE_LENGTH`] (enforced at config load).
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated. Collision with
/// an existing code is not checked here; the store reports that as a
/// conflict at create time.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < MIN_ALIAS_LENGTH || code.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            "Custom code must be 4-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !ALIAS_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Custom code can only contain lowercase letters, digits, and interior hyphens",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
