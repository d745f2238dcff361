//! Short code generation and custom alias validation.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use serde_json::json;
use std::sync::LazyLock;

/// Length of generated short codes.
///
/// Six characters over the 62-symbol alphanumeric alphabet give
/// 62^6 ≈ 5.6 * 10^10 possible codes, so collisions stay negligible and the
/// rare hit is absorbed by the caller's retry-on-conflict loop.
pub const CODE_LENGTH: usize = 6;

/// Maximum accepted length for user-supplied custom aliases.
const MAX_ALIAS_LENGTH: usize = 64;

/// Codes reserved for system endpoints to prevent routing conflicts.
const RESERVED_CODES: &[&str] = &["api", "health", "static"];

static ALIAS_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid alias pattern"));

/// Generates a random 6-character alphanumeric short code.
///
/// Draws uniformly from digits and upper/lowercase letters using the
/// thread-local CSPRNG-seeded generator. Pure generation with no side
/// effects; uniqueness is enforced by the caller against the store.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Non-empty, at most 64 characters
/// - Allowed characters: letters, digits, underscores, hyphens
/// - Cannot be a reserved system code
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            "Custom alias must be 1-64 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !ALIAS_PATTERN.is_match(alias) {
        return Err(AppError::bad_request(
            "Invalid custom alias format. Use only letters, numbers, underscores, hyphens.",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_CODES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
