//! Built-in rule checks
//!
//! Each check takes the raw value and reports whether it satisfies the rule.
//! [`validate_ulid`] exposes the ULID check to `#[derive(Validate)]` structs.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Check: value is non-empty
pub fn required(value: &str) -> bool {
    !value.is_empty()
}

/// Check: value parses as a base-10 signed 64-bit integer
pub fn int(value: &str) -> bool {
    value.parse::<i64>().is_ok()
}

/// Check: value is a canonical ULID
///
/// 26 Crockford base32 characters (no I, L, O, U; either case). The first
/// character is limited to `0`-`7` because the 48-bit timestamp would
/// overflow otherwise.
pub fn is_valid_ulid(value: &str) -> bool {
    static ULID_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = ULID_REGEX.get_or_init(|| {
        Regex::new(r"^[0-7][0-9A-HJKMNP-TV-Za-hjkmnp-tv-z]{25}$").expect("valid ULID pattern")
    });
    regex.is_match(value)
}

/// Custom `validator` function reporting the `ulid` tag
///
/// ```rust,ignore
/// #[derive(Validate, Serialize)]
/// struct CreateBooking {
///     #[validate(custom(function = "this_validate::validate_ulid"))]
///     facility_id: String,
/// }
/// ```
pub fn validate_ulid(value: &str) -> Result<(), validator::ValidationError> {
    if is_valid_ulid(value) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("ulid");
        error.add_param(Cow::Borrowed("value"), &value);
        Err(error)
    }
}
