//! Label print link construction
//!
//! The print endpoint is opened in a new browser tab, so all we produce here
//! is the URL. Quantity validation lives here too because both the HTTP
//! surface and the CLI must reject the same inputs.

use crate::error::{AppError, ConfigError, ErrorCode};
use thiserror::Error;

/// Configuration key naming the print endpoint base
pub const PRINT_URL_KEY: &str = "PRINT_URL";

pub const MIN_PRINT_QUANTITY: u32 = 1;
pub const MAX_PRINT_QUANTITY: u32 = 1000;
/// Quick-pick quantities offered next to the free input
pub const PRINT_QUANTITY_PRESETS: [u32; 5] = [1, 2, 3, 4, 20];

/// Build `{base}?printType=label&code=<encoded>&quantity=<n>`
///
/// `code` is percent-encoded; `quantity` is emitted as given. Fails only when
/// no base is configured.
///
/// # Examples
///
/// ```
/// use shared::print::build_print_url;
///
/// let url = build_print_url(Some("https://x/print"), "ABC123", 5).unwrap();
/// assert_eq!(url, "https://x/print?printType=label&code=ABC123&quantity=5");
/// ```
pub fn build_print_url(base: Option<&str>, code: &str, quantity: u32) -> Result<String, ConfigError> {
    let base = base
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ConfigError::missing(PRINT_URL_KEY))?;

    Ok(format!(
        "{}?printType=label&code={}&quantity={}",
        base,
        urlencoding::encode(code),
        quantity
    ))
}

/// Print base derived from the webhook base: `{webhook}/print`
pub fn print_base_from_webhook(webhook_url: &str) -> String {
    format!("{}/print", webhook_url.trim_end_matches('/'))
}

/// Rejected print quantity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity is not a whole number: {0:?}")]
    NotANumber(String),

    #[error("quantity must be at least {MIN_PRINT_QUANTITY}")]
    TooSmall,

    #[error("quantity must be at most {MAX_PRINT_QUANTITY}")]
    TooLarge,
}

impl From<QuantityError> for AppError {
    fn from(err: QuantityError) -> Self {
        AppError::with_message(ErrorCode::PrintQuantityInvalid, err.to_string())
            .with_detail("min", MIN_PRINT_QUANTITY)
            .with_detail("max", MAX_PRINT_QUANTITY)
    }
}

/// Accept integers in `1..=1000`
pub fn validate_print_quantity(quantity: i64) -> Result<u32, QuantityError> {
    if quantity < MIN_PRINT_QUANTITY as i64 {
        return Err(QuantityError::TooSmall);
    }
    if quantity > MAX_PRINT_QUANTITY as i64 {
        return Err(QuantityError::TooLarge);
    }
    Ok(quantity as u32)
}

/// Parse free-form user input, then validate it
pub fn parse_print_quantity(input: &str) -> Result<u32, QuantityError> {
    let quantity = input
        .trim()
        .parse::<i64>()
        .map_err(|_| QuantityError::NotANumber(input.to_string()))?;
    validate_print_quantity(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_print_url() {
        let url = build_print_url(Some("https://x/print"), "ABC123", 5).unwrap();
        assert_eq!(url, "https://x/print?printType=label&code=ABC123&quantity=5");
    }

    #[test]
    fn test_build_print_url_encodes_code() {
        let url = build_print_url(Some("https://x/print"), "A B/1&2", 1).unwrap();
        assert_eq!(
            url,
            "https://x/print?printType=label&code=A%20B%2F1%262&quantity=1"
        );
    }

    #[test]
    fn test_build_print_url_requires_base() {
        let err = build_print_url(None, "ABC", 1).unwrap_err();
        assert_eq!(err, ConfigError::missing(PRINT_URL_KEY));
        assert!(build_print_url(Some("  "), "ABC", 1).is_err());
    }

    #[test]
    fn test_print_base_from_webhook() {
        assert_eq!(print_base_from_webhook("https://hook/"), "https://hook/print");
        assert_eq!(print_base_from_webhook("https://hook"), "https://hook/print");
    }

    #[test]
    fn test_validate_print_quantity() {
        assert_eq!(validate_print_quantity(1), Ok(1));
        assert_eq!(validate_print_quantity(1000), Ok(1000));
        assert_eq!(validate_print_quantity(0), Err(QuantityError::TooSmall));
        assert_eq!(validate_print_quantity(-3), Err(QuantityError::TooSmall));
        assert_eq!(validate_print_quantity(1001), Err(QuantityError::TooLarge));
    }

    #[test]
    fn test_parse_print_quantity() {
        assert_eq!(parse_print_quantity(" 20 "), Ok(20));
        assert!(matches!(
            parse_print_quantity("2.5"),
            Err(QuantityError::NotANumber(_))
        ));
        assert_eq!(parse_print_quantity("5000"), Err(QuantityError::TooLarge));
    }

    #[test]
    fn test_quantity_error_maps_to_print_code() {
        let app: AppError = QuantityError::TooLarge.into();
        assert_eq!(app.code, ErrorCode::PrintQuantityInvalid);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in PRINT_QUANTITY_PRESETS {
            assert!(validate_print_quantity(preset as i64).is_ok());
        }
    }
}
