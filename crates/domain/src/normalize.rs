//! Canonicalization and strict date parsing for the import boundary.
//!
//! Titles and names are matched on a canonical form: lowercase, diacritics
//! stripped, whitespace collapsed, one pair of surrounding brackets removed.
//! Dates arrive only in the fixed external shape `DD-MM-YYYY HH:mm` and are
//! interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::constants::IMPORT_DATE_FORMAT;

/// The input did not match the fixed `DD-MM-YYYY HH:mm` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date format: expected DD-MM-YYYY HH:mm, got {input:?}")]
pub struct DateFormatError {
    pub input: String,
}

/// Canonicalize a title or name for matching.
///
/// Lowercases, NFKD-decomposes and drops combining marks, collapses
/// whitespace runs to single spaces, trims, then strips one leading `[`
/// and one trailing `]` if present. Empty input (or input that collapses
/// to nothing) yields `None`.
///
/// # Examples
///
/// ```
/// use flowtrack_domain::normalize::normalize_title;
///
/// assert_eq!(normalize_title("  Árvore   de  TÍTULO "), Some("arvore de titulo".to_string()));
/// assert_eq!(normalize_title("[Estoque]"), Some("estoque".to_string()));
/// assert_eq!(normalize_title("   "), None);
/// ```
#[must_use]
pub fn normalize_title(input: &str) -> Option<String> {
    let stripped: String = input.to_lowercase().nfkd().filter(|c| !is_combining_mark(*c)).collect();

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    let trimmed = collapsed.strip_prefix('[').unwrap_or(&collapsed);
    let trimmed = trimmed.strip_suffix(']').unwrap_or(trimmed);

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse the fixed external date shape `DD-MM-YYYY HH:mm` as a UTC instant.
///
/// Day and month must be two digits, the year four, hour and minute two,
/// separated by exactly one space with no surrounding whitespace. Any other
/// shape fails with a [`DateFormatError`].
pub fn parse_strict_date(input: &str) -> Result<DateTime<Utc>, DateFormatError> {
    let err = || DateFormatError { input: input.to_string() };

    let Some((date, time)) = input.split_once(' ') else {
        return Err(err());
    };

    if !matches_digit_pattern(date, b"dd-dd-dddd") || !matches_digit_pattern(time, b"dd:dd") {
        return Err(err());
    }

    let naive = NaiveDateTime::parse_from_str(&format!("{date} {time}"), IMPORT_DATE_FORMAT)
        .map_err(|_| err())?;
    Ok(naive.and_utc())
}

/// Truncate an instant to the start of its calendar day in UTC.
#[must_use]
pub fn truncate_to_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Check an ASCII input against a pattern where `d` means digit and any
/// other byte must match literally.
fn matches_digit_pattern(input: &str, pattern: &[u8]) -> bool {
    input.len() == pattern.len()
        && input.bytes().zip(pattern).all(|(byte, expected)| match expected {
            b'd' => byte.is_ascii_digit(),
            other => byte == *other,
        })
}
