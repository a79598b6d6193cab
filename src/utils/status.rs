//! HTTP-like status codes carried by error messages.
//!
//! Every error produced by the renderer starts its message with a status code
//! (`"404 template not found: blog"`). These helpers recover the code from any
//! displayable error so that callers can set the outward response status and
//! pick the matching error page.

use std::fmt::Display;

/// Status reported when no error occurred.
pub const STATUS_OK: u16 = 200;

/// Status used when a code is missing, unparseable, or outside the error range.
pub const STATUS_INTERNAL: u16 = 500;

/// Lowest status accepted as an error page code.
const ERROR_RANGE_START: u16 = 400;

/// Highest status accepted as an error page code.
const ERROR_RANGE_END: u16 = 599;

/// Extracts the status code from an error message by scanning leading digits.
///
/// `"403 unauthorised"` yields `403`. Messages without leading digits, or with
/// a number outside `400..=599`, yield `500`.
///
/// # Examples
///
/// ```
/// use pagetools::utils::error_code;
///
/// assert_eq!(error_code(&"404 template not found: blog"), 404);
/// assert_eq!(error_code(&"template exploded"), 500);
/// assert_eq!(error_code(&"302 moved"), 500);
/// ```
pub fn error_code(error: &dyn Display) -> u16 {
    let message = error.to_string();
    normalize_code(leading_number(&message))
}

/// Status code for an optional error: `200` when there is none.
pub fn status_code_of<E: Display>(error: Option<&E>) -> u16 {
    match error {
        Some(err) => error_code(err),
        None => STATUS_OK,
    }
}

/// Clamps a raw code into the error range, falling back to `500`.
pub fn normalize_code(code: Option<u32>) -> u16 {
    match code {
        Some(code) if (u32::from(ERROR_RANGE_START)..=u32::from(ERROR_RANGE_END)).contains(&code) => {
            code as u16
        }
        _ => STATUS_INTERNAL,
    }
}

/// Default status-to-path mapping: the decimal code itself (`404` -> `"404"`).
pub fn code_path(code: u16) -> String {
    code.to_string()
}

/// Splits a message into its leading status number and the remaining text.
///
/// The remainder has surrounding whitespace removed.
pub fn split_status(message: &str) -> (Option<u32>, &str) {
    let digits = message.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return (None, message.trim());
    }
    (leading_number(message), message[digits..].trim())
}

// Saturates instead of overflowing on absurdly long digit runs.
fn leading_number(message: &str) -> Option<u32> {
    let mut seen = false;
    let mut value: u32 = 0;
    for byte in message.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(u32::from(byte - b'0'));
    }
    seen.then_some(value)
}
