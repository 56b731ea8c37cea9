pub mod json;
pub mod locale;

pub use json::JsonBody;
pub use locale::UserLocale;
