//! Validation of link target URLs.
//!
//! Targets are stored exactly as submitted; validation only rejects inputs
//! that are not well-formed absolute HTTP(S) URLs.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must have a host")]
    MissingHost,
}

/// Validates that `input` is a well-formed absolute HTTP(S) URL.
///
/// The URL is not rewritten in any way: a link resolves to byte-for-byte
/// what its creator submitted.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed URLs,
/// [`UrlValidationError::UnsupportedProtocol`] for schemes other than
/// `http`/`https` (including `javascript:`, `data:`, `file:`), and
/// [`UrlValidationError::MissingHost`] for host-less URLs.
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none() {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}
