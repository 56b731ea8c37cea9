//! Locale cookie read/write.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{JsonBody, UserLocale};
use crate::handlers::decode;
use crate::locale::{write_locale, LocaleBody};
use crate::response::success_one_ok;
use axum::response::IntoResponse;
use tower_cookies::Cookies;

pub static LOCALE_TAG: &str = "locale";

#[utoipa::path(
    get,
    path = "/api/v1/locale",
    tag = LOCALE_TAG,
    responses(
        (status = 200, description = "Current locale; unsupported cookie values read as en")
    ),
)]
pub async fn get_locale(UserLocale(locale): UserLocale) -> impl IntoResponse {
    success_one_ok(LocaleBody { locale })
}

#[utoipa::path(
    put,
    path = "/api/v1/locale",
    tag = LOCALE_TAG,
    request_body = LocaleBody,
    responses(
        (status = 200, description = "Locale cookie written"),
        (status = 400, description = "Unsupported locale or malformed body", body = ErrorBody)
    ),
)]
pub async fn set_locale(cookies: Cookies, JsonBody(body): JsonBody) -> Result<impl IntoResponse, AppError> {
    let body: LocaleBody = decode(body)?;
    write_locale(&cookies, body.locale);
    tracing::debug!(locale = body.locale.as_str(), "locale set");
    Ok(success_one_ok(body))
}
