//! Blog API: REST procedures for articles, categories and users, with allow-listed list queries.

pub mod case;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod locale;
pub mod model;
pub mod openapi;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use locale::Locale;
pub use query::{build_query, QuerySpec};
pub use response::{success_many, success_one};
pub use routes::{build_router, API_PREFIX};
pub use settings::AppConfig;
pub use state::AppState;
pub use store::{ensure_tables, MemoryStore, PgStore, Store};
