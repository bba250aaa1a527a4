//! Raw-string coercion for environment values.
//!
//! Every function takes the value exactly as it appeared in the
//! environment and returns either the typed value or the reason it was
//! rejected. Callers attach the key and raw value when they turn a
//! reason into an error, so reasons only describe the expectation.

use std::num::IntErrorKind;

/// Tokens accepted as boolean true, matched case-insensitively.
pub const TRUE_TOKENS: [&str; 5] = ["true", "yes", "on", "1", "y"];

/// Tokens accepted as boolean false, matched case-insensitively.
pub const FALSE_TOKENS: [&str; 5] = ["false", "no", "off", "0", "n"];

pub(crate) const REASON_BOOL: &str =
    "expected a boolean token (true/yes/on/1/y or false/no/off/0/n)";
pub(crate) const REASON_INTEGER: &str = "expected an integer";
pub(crate) const REASON_POSITIVE: &str = "expected a positive integer";
pub(crate) const REASON_RANGE: &str = "integer out of range";
pub(crate) const REASON_PORT: &str = "expected a port between 1 and 65535";

/// Parses a boolean token. Anything outside the two token sets is an
/// error, never a silent false.
pub fn parse_bool(raw: &str) -> Result<bool, String> {
    let token = raw.trim().to_ascii_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        Ok(true)
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        Ok(false)
    } else {
        Err(REASON_BOOL.to_string())
    }
}

/// Strictly parses a positive integer that fits a `u32`.
pub fn parse_positive_u32(raw: &str) -> Result<u32, String> {
    let token = raw.trim();
    match token.parse::<u32>() {
        Ok(0) => Err(REASON_POSITIVE.to_string()),
        Ok(value) => Ok(value),
        Err(err) => Err(rejection_reason(token, err.kind())),
    }
}

/// Strictly parses a positive integer that fits a `u64`.
pub fn parse_positive_u64(raw: &str) -> Result<u64, String> {
    let token = raw.trim();
    match token.parse::<u64>() {
        Ok(0) => Err(REASON_POSITIVE.to_string()),
        Ok(value) => Ok(value),
        Err(err) => Err(rejection_reason(token, err.kind())),
    }
}

/// Strictly parses a non-zero TCP port.
pub fn parse_port(raw: &str) -> Result<u16, String> {
    let token = raw.trim();
    match token.parse::<u16>() {
        Ok(0) => Err(REASON_PORT.to_string()),
        Ok(value) => Ok(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Err(REASON_PORT.to_string()),
            _ if is_negative_integer(token) => Err(REASON_PORT.to_string()),
            _ => Err(REASON_INTEGER.to_string()),
        },
    }
}

/// Splits a comma-separated value into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn rejection_reason(token: &str, kind: &IntErrorKind) -> String {
    match kind {
        IntErrorKind::PosOverflow => REASON_RANGE.to_string(),
        _ if is_negative_integer(token) => REASON_POSITIVE.to_string(),
        _ => REASON_INTEGER.to_string(),
    }
}

// A minus sign makes unsigned parses fail with InvalidDigit, which
// would misreport "-5" as not an integer at all.
fn is_negative_integer(token: &str) -> bool {
    token.parse::<i64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_accepts_every_true_token() {
        for token in TRUE_TOKENS {
            assert_eq!(parse_bool(token), Ok(true), "token {token:?}");
        }
        assert_eq!(parse_bool("True"), Ok(true));
        assert_eq!(parse_bool(" YES "), Ok(true));
    }

    #[test]
    fn test_bool_accepts_every_false_token() {
        for token in FALSE_TOKENS {
            assert_eq!(parse_bool(token), Ok(false), "token {token:?}");
        }
        assert_eq!(parse_bool("False"), Ok(false));
        assert_eq!(parse_bool("OFF"), Ok(false));
    }

    #[test]
    fn test_bool_rejects_unknown_tokens() {
        for raw in ["maybe", "2", "tru", "", "enabled"] {
            let err = parse_bool(raw).unwrap_err();
            assert_eq!(err, REASON_BOOL, "raw {raw:?}");
        }
    }

    #[test]
    fn test_positive_u32_parses_and_trims() {
        assert_eq!(parse_positive_u32("100"), Ok(100));
        assert_eq!(parse_positive_u32(" 5 "), Ok(5));
    }

    #[test]
    fn test_positive_u32_rejects_zero_negative_and_garbage() {
        assert_eq!(parse_positive_u32("0").unwrap_err(), REASON_POSITIVE);
        assert_eq!(parse_positive_u32("-5").unwrap_err(), REASON_POSITIVE);
        assert_eq!(parse_positive_u32("abc").unwrap_err(), REASON_INTEGER);
        assert_eq!(parse_positive_u32("4.5").unwrap_err(), REASON_INTEGER);
        assert_eq!(parse_positive_u32("").unwrap_err(), REASON_INTEGER);
        assert_eq!(parse_positive_u32("5000000000").unwrap_err(), REASON_RANGE);
    }

    #[test]
    fn test_positive_u64_covers_large_values() {
        assert_eq!(parse_positive_u64("3600"), Ok(3600));
        assert_eq!(parse_positive_u64("0").unwrap_err(), REASON_POSITIVE);
        assert_eq!(parse_positive_u64("-1").unwrap_err(), REASON_POSITIVE);
    }

    #[test]
    fn test_port_bounds_are_enforced() {
        assert_eq!(parse_port("3306"), Ok(3306));
        assert_eq!(parse_port("65535"), Ok(65535));
        assert_eq!(parse_port("0").unwrap_err(), REASON_PORT);
        assert_eq!(parse_port("65536").unwrap_err(), REASON_PORT);
        assert_eq!(parse_port("-1").unwrap_err(), REASON_PORT);
        assert_eq!(parse_port("html").unwrap_err(), REASON_INTEGER);
    }

    #[test]
    fn test_list_splits_trims_and_drops_empties() {
        assert_eq!(
            split_list("localhost,127.0.0.1"),
            vec!["localhost", "127.0.0.1"]
        );
        assert_eq!(
            split_list(" a.example.com , b.example.com "),
            vec!["a.example.com", "b.example.com"]
        );
        assert_eq!(split_list("host,,"), vec!["host"]);
        assert!(split_list("").is_empty());
        assert!(split_list(" , ,").is_empty());
    }
}
