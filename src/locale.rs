//! User locale stored in a cookie. Only `en` and `ru` are supported; anything else reads as `en`.

use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};
use utoipa::ToSchema;

pub const COOKIE_NAME: &str = "NEXT_LOCALE";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "en" => Some(Locale::En),
            "ru" => Some(Locale::Ru),
            _ => None,
        }
    }

    /// Unsupported or missing cookie values fall back to the default locale.
    pub fn from_cookie_value(value: Option<&str>) -> Self {
        value.and_then(Locale::parse).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LocaleBody {
    pub locale: Locale,
}

pub fn read_locale(cookies: &Cookies) -> Locale {
    let cookie = cookies.get(COOKIE_NAME);
    Locale::from_cookie_value(cookie.as_ref().map(|c| c.value()))
}

/// Replace the locale cookie.
pub fn write_locale(cookies: &Cookies, locale: Locale) {
    cookies.remove(Cookie::build(COOKIE_NAME).path("/").build());
    cookies.add(Cookie::build((COOKIE_NAME, locale.as_str())).path("/").build());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_values_fall_back_to_default() {
        assert_eq!(Locale::from_cookie_value(Some("fr")), Locale::En);
        assert_eq!(Locale::from_cookie_value(Some("RU")), Locale::En);
        assert_eq!(Locale::from_cookie_value(None), Locale::En);
        assert_eq!(Locale::from_cookie_value(Some("ru")), Locale::Ru);
    }

    #[test]
    fn body_rejects_unsupported_locale() {
        assert!(serde_json::from_str::<LocaleBody>(r#"{"locale":"fr"}"#).is_err());
        let body: LocaleBody = serde_json::from_str(r#"{"locale":"ru"}"#).unwrap();
        assert_eq!(body.locale, Locale::Ru);
    }
}
