//! Parsing of raw form fields into typed values.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::ValidationError;

static STATE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2}$").expect("state pattern"));
static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip pattern"));

/// Trimmed value, empty when the field was not sent.
pub fn text(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

pub fn required_text(value: &Option<String>, message: &str) -> Result<String, ValidationError> {
    let value = text(value);
    if value.is_empty() {
        Err(ValidationError::new(message))
    } else {
        Ok(value)
    }
}

/// An optional id: absent, blank or `all` mean no selection.
pub fn optional_id(value: &Option<String>, field: &str) -> Result<Option<i32>, ValidationError> {
    let raw = text(value);
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| ValidationError::new(format!("{} is not a valid selection.", field)))
}

pub fn required_id(value: &Option<String>, message: &str) -> Result<i32, ValidationError> {
    text(value)
        .parse::<i32>()
        .map_err(|_| ValidationError::new(message))
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part which is dropped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = match raw.char_indices().nth(10) {
        Some((idx, 'T' | ' ')) => &raw[..idx],
        Some(_) => return None,
        None => raw,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn optional_date(value: &Option<String>, field: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let raw = text(value);
    if raw.is_empty() {
        return Ok(None);
    }
    parse_date(&raw)
        .map(Some)
        .ok_or_else(|| ValidationError::new(format!("{} must be a date like 2024-01-31.", field)))
}

pub fn optional_cost(value: &Option<String>) -> Result<Option<Decimal>, ValidationError> {
    let raw = text(value);
    if raw.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(raw.trim_start_matches('$'))
        .map(Some)
        .map_err(|_| ValidationError::new("Cost must be a number, for example 19.99."))
}

/// Two-letter state code, stored upper-cased. Blank is allowed.
pub fn state_code(value: &Option<String>) -> Result<String, ValidationError> {
    let raw = text(value);
    if raw.is_empty() {
        return Ok(raw);
    }
    if STATE_CODE.is_match(&raw) {
        Ok(raw.to_uppercase())
    } else {
        Err(ValidationError::new("State must be a two-letter code."))
    }
}

/// `12345` or `12345-6789`. Blank is allowed.
pub fn zip_code(value: &Option<String>) -> Result<String, ValidationError> {
    let raw = text(value);
    if raw.is_empty() || ZIP_CODE.is_match(&raw) {
        Ok(raw)
    } else {
        Err(ValidationError::new("ZIP code must look like 12345 or 12345-6789."))
    }
}
