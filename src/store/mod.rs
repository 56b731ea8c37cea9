//! Storage collaborator: record CRUD by id and descriptor-driven listing.

mod memory;
mod pg;
mod schema;

pub use memory::MemoryStore;
pub use pg::PgStore;
pub use schema::{ensure_tables, table_ddl};

use crate::error::AppError;
use crate::model::EntityDef;
use crate::query::{PredicateMap, QuerySpec};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Column name (snake_case) -> value to write.
pub type Record = HashMap<String, Value>;

/// Insert `value` under `column` only when present.
pub fn set_if_present<V: Into<Value>>(record: &mut Record, column: &str, value: Option<V>) {
    if let Some(v) = value {
        record.insert(column.to_string(), v.into());
    }
}

/// Rows come back as JSON objects keyed by column name.
/// Lookups and mutations on a missing id return `Ok(None)`; callers decide whether that is an error.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap liveness check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;

    async fn insert(&self, entity: &EntityDef, values: &Record) -> Result<Value, AppError>;

    async fn find_by_id(&self, entity: &EntityDef, id: Uuid) -> Result<Option<Value>, AppError>;

    async fn find_many(&self, entity: &EntityDef, query: &QuerySpec) -> Result<Vec<Value>, AppError>;

    async fn update(&self, entity: &EntityDef, id: Uuid, values: &Record) -> Result<Option<Value>, AppError>;

    async fn delete(&self, entity: &EntityDef, id: Uuid) -> Result<Option<Value>, AppError>;

    async fn find_first(&self, entity: &EntityDef, predicates: &PredicateMap) -> Result<Option<Value>, AppError> {
        let rows = self.find_many(entity, &QuerySpec::first(predicates.clone())).await?;
        Ok(rows.into_iter().next())
    }
}
