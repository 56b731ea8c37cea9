//! Extract the caller's locale from the `NEXT_LOCALE` cookie.

use crate::locale::{read_locale, Locale};
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_cookies::Cookies;

/// Locale of the current request. Never rejects: without the cookie layer or a valid cookie it is the default.
#[derive(Clone, Copy, Debug)]
pub struct UserLocale(pub Locale);

#[async_trait]
impl<S> FromRequestParts<S> for UserLocale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Cookies::from_request_parts(parts, state)
            .await
            .map(|cookies| read_locale(&cookies))
            .unwrap_or_default();
        Ok(UserLocale(locale))
    }
}
