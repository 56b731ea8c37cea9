//! HTTP handlers for users, articles, categories and the locale cookie.

pub mod article;
pub mod category;
pub mod locale;
pub mod user;

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a JSON body into a typed payload, reporting shape errors as `BadRequest`.
fn decode<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))
}
