//! Entity services: validate payloads, build store records and queries, shape rows for output.

mod article;
mod category;
mod user;
pub mod validation;

pub use article::ArticleService;
pub use category::CategoryService;
pub use user::UserService;

use crate::case::row_to_wire;
use crate::error::AppError;
use crate::model::EntityDef;
use crate::query::QuerySpec;
use serde_json::Value;
use uuid::Uuid;

/// One page of a list query with the window that produced it.
#[derive(Debug)]
pub struct Page {
    pub rows: Vec<Value>,
    pub offset: u32,
    pub limit: Option<u32>,
}

impl Page {
    fn new(rows: Vec<Value>, spec: &QuerySpec) -> Self {
        Page {
            rows: rows.into_iter().map(row_to_wire).collect(),
            offset: spec.offset,
            limit: spec.limit,
        }
    }
}

/// Map a store miss on `id` to `NotFound`, otherwise shape the row for output.
fn found(entity: &EntityDef, id: Uuid, row: Option<Value>) -> Result<Value, AppError> {
    row.map(row_to_wire)
        .ok_or_else(|| AppError::NotFound(format!("{} {}", entity.label, id)))
}
