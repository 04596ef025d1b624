//! Field-level validation shared by all catalog records.
//!
//! Lengths are counted in Unicode scalar values, which matches SQLite's
//! `length()` on TEXT columns used by the schema `CHECK` constraints.

use crate::model::EntityKind;
use chrono::{Datelike, NaiveDate};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Maximum characters for author, publisher and genre names.
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum characters for comic titles.
pub const TITLE_MAX_CHARS: usize = 200;
/// Textual form accepted for `Comic::release_date`.
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";
/// Release years that keep four-digit ISO text in date order.
pub const RELEASE_YEARS: RangeInclusive<i32> = 1..=9999;

/// Validation failures raised before any record reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{entity}.{field} is required")]
    MissingField {
        entity: EntityKind,
        field: &'static str,
    },
    #[error("{entity}.{field} must be at most {max} characters, got {actual}")]
    TooLong {
        entity: EntityKind,
        field: &'static str,
        max: usize,
        actual: usize,
    },
    #[error("invalid release date `{value}`; expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("release date {value} is outside years 0001 through 9999")]
    DateOutOfRange { value: NaiveDate },
    #[error("{entity} id must not be nil")]
    NilId { entity: EntityKind },
}

/// Requires a non-blank value.
pub fn require_text(
    entity: EntityKind,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { entity, field });
    }
    Ok(())
}

/// Requires a non-blank value of at most `max` characters.
pub fn require_short_text(
    entity: EntityKind,
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    require_text(entity, field, value)?;
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            entity,
            field,
            max,
            actual,
        });
    }
    Ok(())
}

/// Requires a release year in `RELEASE_YEARS`.
pub fn require_release_year(value: NaiveDate) -> Result<(), ValidationError> {
    if !RELEASE_YEARS.contains(&value.year()) {
        return Err(ValidationError::DateOutOfRange { value });
    }
    Ok(())
}

/// Parses a calendar date in `YYYY-MM-DD` form within `RELEASE_YEARS`.
pub fn parse_release_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let date = NaiveDate::parse_from_str(value.trim(), RELEASE_DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            value: value.to_string(),
        }
    })?;
    require_release_year(date)?;
    Ok(date)
}
