//! In-process store used when no database is configured, and by the test suite.
//! Honors column defaults, NOT NULL and UNIQUE; foreign keys are not checked.

use crate::error::AppError;
use crate::model::entity::timestamp_now;
use crate::model::EntityDef;
use crate::query::{Direction, Predicate, PredicateMap, QuerySpec};
use crate::store::{Record, Store};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

type Row = Map<String, Value>;

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Vec<Row>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn row_id(row: &Row) -> Option<&str> {
    row.get(EntityDef::PK).and_then(Value::as_str)
}

/// Reject a row whose unique columns collide with another row (ignoring `skip_id`).
fn check_unique(entity: &EntityDef, rows: &[Row], candidate: &Row, skip_id: Option<&str>) -> Result<(), AppError> {
    for col in entity.columns.iter().filter(|c| c.unique) {
        let Some(v) = candidate.get(col.name).filter(|v| !v.is_null()) else { continue };
        let clash = rows
            .iter()
            .filter(|r| skip_id.is_none() || row_id(r) != skip_id)
            .any(|r| r.get(col.name) == Some(v));
        if clash {
            return Err(AppError::Conflict(format!("{} with this {} already exists", entity.label, col.name)));
        }
    }
    Ok(())
}

fn matches(value: Option<&Value>, predicate: &Predicate) -> bool {
    let value = value.unwrap_or(&Value::Null);
    match predicate {
        Predicate::Equals(expected) => match value {
            Value::String(s) => s == expected,
            Value::Number(n) => n.to_string() == *expected,
            Value::Bool(b) => b.to_string() == *expected,
            _ => false,
        },
        Predicate::Contains(needle) => value.as_str().is_some_and(|s| s.contains(needle.as_str())),
        Predicate::HasEvery(wanted) => value.as_array().is_some_and(|items| {
            wanted
                .iter()
                .all(|w| items.iter().any(|i| i.as_str() == Some(w.as_str())))
        }),
    }
}

fn matches_all(row: &Row, predicates: &PredicateMap) -> bool {
    predicates.iter().all(|(col, p)| matches(row.get(col), p))
}

/// Ascending comparison with NULLs last, as PostgreSQL orders them.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert(&self, entity: &EntityDef, values: &Record) -> Result<Value, AppError> {
        let mut row = Row::new();
        for col in entity.columns {
            let v = match values.get(col.name) {
                Some(v) => v.clone(),
                None => col.default.map(|d| d.value()).unwrap_or(Value::Null),
            };
            if v.is_null() && !col.nullable {
                return Err(AppError::Validation(format!("{} is required", col.name)));
            }
            row.insert(col.name.to_string(), v);
        }
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        let rows = tables.entry(entity.table).or_default();
        check_unique(entity, rows, &row, None)?;
        rows.push(row.clone());
        Ok(Value::Object(row))
    }

    async fn find_by_id(&self, entity: &EntityDef, id: Uuid) -> Result<Option<Value>, AppError> {
        let id = id.to_string();
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        Ok(tables
            .get(entity.table)
            .and_then(|rows| rows.iter().find(|r| row_id(r) == Some(id.as_str())))
            .map(|r| Value::Object(r.clone())))
    }

    async fn find_many(&self, entity: &EntityDef, query: &QuerySpec) -> Result<Vec<Value>, AppError> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        let Some(rows) = tables.get(entity.table) else {
            return Ok(Vec::new());
        };
        let mut hits: Vec<&Row> = rows.iter().filter(|r| matches_all(r, &query.predicates)).collect();
        hits.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|(col, dir)| {
                    let ord = compare_values(a.get(col), b.get(col));
                    match dir {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    }
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(hits
            .into_iter()
            .skip(query.offset as usize)
            .take(limit)
            .map(|r| Value::Object(r.clone()))
            .collect())
    }

    async fn update(&self, entity: &EntityDef, id: Uuid, values: &Record) -> Result<Option<Value>, AppError> {
        let id = id.to_string();
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        let Some(rows) = tables.get_mut(entity.table) else {
            return Ok(None);
        };
        let Some(pos) = rows.iter().position(|r| row_id(r) == Some(id.as_str())) else {
            return Ok(None);
        };
        let mut updated = rows[pos].clone();
        for col in entity.columns {
            if col.name == EntityDef::PK {
                continue;
            }
            if let Some(v) = values.get(col.name) {
                if v.is_null() && !col.nullable {
                    return Err(AppError::Validation(format!("{} cannot be null", col.name)));
                }
                updated.insert(col.name.to_string(), v.clone());
            }
        }
        if entity.column("updated_at").is_some() {
            updated.insert("updated_at".to_string(), Value::String(timestamp_now()));
        }
        check_unique(entity, rows, &updated, Some(id.as_str()))?;
        rows[pos] = updated.clone();
        Ok(Some(Value::Object(updated)))
    }

    async fn delete(&self, entity: &EntityDef, id: Uuid) -> Result<Option<Value>, AppError> {
        let id = id.to_string();
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        let Some(rows) = tables.get_mut(entity.table) else {
            return Ok(None);
        };
        Ok(rows
            .iter()
            .position(|r| row_id(r) == Some(id.as_str()))
            .map(|pos| Value::Object(rows.remove(pos))))
    }
}
