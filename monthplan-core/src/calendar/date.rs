//! Strict `YYYY-MM-DD` date parsing.

use chrono::NaiveDate;

use crate::error::{PlanError, PlanResult, TokenKind};

pub(crate) fn is_digits(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit)
}

/// Parse a zero-padded `YYYY-MM-DD` date.
///
/// chrono alone accepts unpadded fields, so the shape is checked first.
pub fn parse_date(s: &str) -> PlanResult<NaiveDate> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && is_digits(&bytes[..4])
        && is_digits(&bytes[5..7])
        && is_digits(&bytes[8..]);

    if !shaped {
        return Err(PlanError::invalid(TokenKind::Date, s));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| PlanError::invalid(TokenKind::Date, s))
}
