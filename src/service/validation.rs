//! Field-level input checks shared by the entity services.

use crate::error::AppError;
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> Result<&'static Regex, AppError> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN))
        .as_ref()
        .map_err(|_| AppError::Validation("invalid email pattern".into()))
}

pub fn validate_email(field: &str, value: &str) -> Result<(), AppError> {
    if !email_regex()?.is_match(value) {
        return Err(AppError::Validation(format!("{} must be a valid email", field)));
    }
    Ok(())
}

pub fn parse_uuid(field: &str, value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| AppError::Validation(format!("{} must be a valid UUID", field)))
}

/// Length bounds counted in characters, inclusive.
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min {
        return Err(AppError::Validation(format!("{} must be at least {} characters", field, min)));
    }
    if len > max {
        return Err(AppError::Validation(format!("{} must be at most {} characters", field, max)));
    }
    Ok(())
}

/// Path ids are uuids; anything else is a malformed request rather than a missing record.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("invalid uuid".into()))
}
