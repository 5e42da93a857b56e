//! Lenient coercions shared by input validation and response classification.
//!
//! Configuration arrives as flag strings or TOML scalars, and the publish API
//! answers with JSON whose field types are not guaranteed. Both go through the
//! same two coercions so that `"42"` and `42` are treated alike everywhere.

use std::num::NonZeroU64;

/// A loosely-typed value that can be coerced into the primitive shapes the
/// publisher relies on.
pub trait Coerce {
    /// Returns the value as an integer strictly greater than zero.
    ///
    /// Numbers must hold an exact unsigned integer, so `42.0` is accepted but
    /// `42.5` is not. Text must consist solely of ASCII digits once
    /// surrounding whitespace is trimmed.
    fn as_positive_integer(&self) -> Option<NonZeroU64>;

    /// Returns the value as text containing at least one character.
    ///
    /// Non-text values are never coerced, so `42` is not a valid string.
    fn as_non_empty_str(&self) -> Option<&str>;
}

impl Coerce for str {
    fn as_positive_integer(&self) -> Option<NonZeroU64> {
        parse_unsigned(self).and_then(NonZeroU64::new)
    }

    fn as_non_empty_str(&self) -> Option<&str> {
        (!self.is_empty()).then_some(self)
    }
}

impl Coerce for serde_json::Value {
    fn as_positive_integer(&self) -> Option<NonZeroU64> {
        match self {
            Self::Number(number) => number
                .as_u64()
                .or_else(|| number.as_f64().and_then(exact_unsigned))
                .and_then(NonZeroU64::new),
            Self::String(text) => text.as_positive_integer(),
            _ => None,
        }
    }

    fn as_non_empty_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => text.as_non_empty_str(),
            _ => None,
        }
    }
}

/// Exclusive upper bound of `u64` as a float (2^64).
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the cast only runs on whole numbers inside the u64 range"
)]
fn exact_unsigned(value: f64) -> Option<u64> {
    if value.fract().abs() > 0.0 || !(0.0..U64_LIMIT).contains(&value) {
        return None;
    }
    Some(value as u64)
}

/// Parses an unsigned decimal integer, rejecting signs, fractions, and
/// trailing garbage that a more forgiving parser would silently drop.
pub(crate) fn parse_unsigned(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::plain("42", Some(42))]
    #[case::padded(" 7\n", Some(7))]
    #[case::zero("0", None)]
    #[case::negative("-3", None)]
    #[case::explicit_sign("+3", None)]
    #[case::trailing_garbage("12abc", None)]
    #[case::fraction("4.5", None)]
    #[case::empty("", None)]
    #[case::overflow("18446744073709551616", None)]
    fn str_positive_integer(#[case] input: &str, #[case] expected: Option<u64>) {
        assert_eq!(input.as_positive_integer().map(NonZeroU64::get), expected);
    }

    #[rstest]
    #[case::integer(json!(42), Some(42))]
    #[case::numeric_string(json!("42"), Some(42))]
    #[case::zero(json!(0), None)]
    #[case::negative(json!(-1), None)]
    #[case::whole_float(json!(42.0), Some(42))]
    #[case::float(json!(42.5), None)]
    #[case::zero_float(json!(0.0), None)]
    #[case::huge_float(json!(1e30), None)]
    #[case::boolean(json!(true), None)]
    #[case::null(json!(null), None)]
    #[case::object(json!({"versionNumber": 1}), None)]
    fn json_positive_integer(#[case] input: serde_json::Value, #[case] expected: Option<u64>) {
        assert_eq!(input.as_positive_integer().map(NonZeroU64::get), expected);
    }

    #[test]
    fn non_empty_str_accepts_only_text() {
        assert_eq!(json!("bad request").as_non_empty_str(), Some("bad request"));
        assert_eq!(json!("").as_non_empty_str(), None);
        assert_eq!(json!(7).as_non_empty_str(), None);
        assert_eq!("key".as_non_empty_str(), Some("key"));
        assert_eq!("".as_non_empty_str(), None);
    }
}
