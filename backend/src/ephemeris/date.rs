//! Birthdate normalization.
//!
//! The ephemeris binary expects `-b<day>.<month>.<year>`. Users send dates
//! with `.`, `-` or `/` separators; all of them end up in the dotted form.

use chrono::{Datelike, NaiveDate};

use super::error::{EphemerisError, EphemerisResult};

/// Accepted input patterns, tried in order. Day comes first in all of them.
const INPUT_PATTERNS: [(char, &str); 3] = [('.', "%d.%m.%Y"), ('-', "%d-%m-%Y"), ('/', "%d/%m/%Y")];

/// Canonical rendering handed to the argument builder.
const CANONICAL_PATTERN: &str = "%-d.%-m.%Y";

/// Parse `input` as a day-first date and render it as `day.month.year`.
///
/// `05/03/1990`, `5-3-1990` and `5.3.1990` all become `5.3.1990`.
pub fn normalize_birthdate(input: &str) -> EphemerisResult<String> {
    let date = parse_birthdate(input)?;
    Ok(date.format(CANONICAL_PATTERN).to_string())
}

/// Parse a day-first date string against the accepted patterns.
pub fn parse_birthdate(input: &str) -> EphemerisResult<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(input, "birthdate is empty"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(invalid(input, "birthdate must not contain whitespace"));
    }

    let mut last_error = None;
    for (separator, pattern) in INPUT_PATTERNS {
        if !trimmed.contains(separator) {
            continue;
        }
        match NaiveDate::parse_from_str(trimmed, pattern) {
            Ok(date) => {
                let year = trimmed.rsplit(separator).next().unwrap_or_default();
                if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid(input, "year must have four digits"));
                }
                if !(1..=12).contains(&date.month()) {
                    return Err(invalid(input, format!("month {} out of range", date.month())));
                }
                return Ok(date);
            }
            Err(e) => last_error = Some(e),
        }
    }

    let reason = match last_error {
        Some(e) => format!("expected dd.mm.yyyy, dd-mm-yyyy or dd/mm/yyyy ({})", e),
        None => "expected dd.mm.yyyy, dd-mm-yyyy or dd/mm/yyyy".to_string(),
    };
    Err(invalid(input, reason))
}

fn invalid(input: &str, reason: impl Into<String>) -> EphemerisError {
    EphemerisError::InvalidDate {
        input: input.to_string(),
        reason: reason.into(),
    }
}
