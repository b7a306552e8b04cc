//! Pure validation checks shared by builders and callers.
//!
//! Every function here returns a plain `bool` and never panics: malformed
//! or missing input is simply invalid, not an error to propagate.

use chrono::DateTime;
use serde_json::Value;

/// Error code prefix shared by the whole namespace
const CODE_PREFIX: &str = "FUN";

/// Number of decimal digits following the prefix
const CODE_DIGITS: usize = 9;

/// Validate error code format: `FUN` followed by exactly nine ASCII digits.
pub fn validate_error_code(error_code: &str) -> bool {
    if error_code.len() != CODE_PREFIX.len() + CODE_DIGITS {
        return false;
    }
    let Some(digits) = error_code.strip_prefix(CODE_PREFIX) else {
        return false;
    };
    digits.bytes().all(|b| b.is_ascii_digit())
}

/// Validate that a timestamp string carries explicit offset information.
///
/// Accepts RFC 3339 text such as `2024-01-01T00:00:00+08:00`; naive
/// timestamps without an offset are rejected.
pub fn validate_datetime(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}

/// Validate paging parameters supplied as a JSON object.
///
/// Requires `page`, `pageSize`, `totalElements` and `totalPages` to all be
/// present as integers. Rejects negative `page`/`totalElements`/`totalPages`,
/// non-positive `pageSize`, and `page >= totalPages` whenever `totalPages`
/// is positive. Anything that is not an object with integer fields is
/// invalid, not an error.
pub fn validate_paging(params: &Value) -> bool {
    let Some(obj) = params.as_object() else {
        return false;
    };

    let field = |key: &str| obj.get(key).and_then(Value::as_i64);

    let (Some(page), Some(page_size), Some(total_elements), Some(total_pages)) = (
        field("page"),
        field("pageSize"),
        field("totalElements"),
        field("totalPages"),
    ) else {
        return false;
    };

    if page < 0 || page_size <= 0 || total_elements < 0 || total_pages < 0 {
        return false;
    }

    // A non-empty result set cannot point past its last page
    if total_pages > 0 && page >= total_pages {
        return false;
    }

    true
}
