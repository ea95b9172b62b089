//! Token generation and validation.
//!
//! Generated tokens come from CSPRNG bytes encoded as URL-safe base64.
//! Caller-supplied tokens are validated against the charset, length, and the
//! service's own route names.

use base64::Engine as _;
use serde_json::json;

use crate::error::AppError;

/// Length of random bytes before base64 encoding.
const TOKEN_LENGTH_BYTES: usize = 9;

/// Shortest accepted custom token.
const MIN_TOKEN_LEN: usize = 4;

/// Longest accepted custom token.
const MAX_TOKEN_LEN: usize = 32;

/// Path segments owned by the service itself.
///
/// A custom token equal to one of these would be shadowed by (or shadow) a
/// fixed route, so they are rejected.
const RESERVED_TOKENS: &[&str] = &["create", "statistics", "qrcode", "health"];

/// Generates a random URL-safe token.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character token.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_token() -> String {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a caller-supplied token.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot be one of the service's own route names
///
/// Tokens are matched case-sensitively, so mixed case is allowed.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_token(token: &str) -> Result<(), AppError> {
    if token.len() < MIN_TOKEN_LEN || token.len() > MAX_TOKEN_LEN {
        return Err(AppError::bad_request(
            "Token must be 4-32 characters",
            json!({ "provided_length": token.len() }),
        ));
    }

    if !token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Token can only contain letters, digits, hyphens, and underscores",
            json!({ "token": token }),
        ));
    }

    if RESERVED_TOKENS.contains(&token) {
        return Err(AppError::bad_request(
            "This token is reserved",
            json!({ "token": token }),
        ));
    }

    Ok(())
}
