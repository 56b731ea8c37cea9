//! PostgreSQL store: runs the builder's parameterized SQL through a sqlx pool.

use crate::error::AppError;
use crate::model::{ColumnType, EntityDef};
use crate::query::QuerySpec;
use crate::sql::{self, PgBindValue, QueryBuf};
use crate::store::{Record, Store};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn fetch_optional(&self, entity: &EntityDef, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let row = query.fetch_optional(&self.pool).await?;
        row.map(|r| row_to_json(entity, &r)).transpose()
    }

    async fn fetch_all(&self, entity: &EntityDef, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(|r| row_to_json(entity, r)).collect()
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, entity: &EntityDef, values: &Record) -> Result<Value, AppError> {
        let q = sql::insert(entity, values);
        self.fetch_optional(entity, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn find_by_id(&self, entity: &EntityDef, id: Uuid) -> Result<Option<Value>, AppError> {
        let q = sql::select_by_id(entity, &id.to_string());
        self.fetch_optional(entity, &q).await
    }

    async fn find_many(&self, entity: &EntityDef, query: &QuerySpec) -> Result<Vec<Value>, AppError> {
        let q = sql::select_list(entity, query);
        self.fetch_all(entity, &q).await
    }

    async fn update(&self, entity: &EntityDef, id: Uuid, values: &Record) -> Result<Option<Value>, AppError> {
        let q = sql::update(entity, &id.to_string(), values);
        self.fetch_optional(entity, &q).await
    }

    async fn delete(&self, entity: &EntityDef, id: Uuid) -> Result<Option<Value>, AppError> {
        let q = sql::delete(entity, &id.to_string());
        self.fetch_optional(entity, &q).await
    }
}

/// Decode a row column by column using the entity's declared types.
fn row_to_json(entity: &EntityDef, row: &PgRow) -> Result<Value, AppError> {
    let mut map = serde_json::Map::new();
    for col in entity.columns {
        let name = col.name;
        let v = match col.ty {
            ColumnType::Uuid => row
                .try_get::<Option<Uuid>, _>(name)?
                .map(|u| Value::String(u.to_string())),
            ColumnType::Text => row.try_get::<Option<String>, _>(name)?.map(Value::String),
            ColumnType::TextArray => row.try_get::<Option<Vec<String>>, _>(name)?.map(Value::from),
            ColumnType::Int => row.try_get::<Option<i32>, _>(name)?.map(Value::from),
            ColumnType::Timestamptz => row
                .try_get::<Option<DateTime<Utc>>, _>(name)?
                .map(|d| Value::String(d.to_rfc3339_opts(SecondsFormat::Millis, true))),
        };
        map.insert(name.to_string(), v.unwrap_or(Value::Null));
    }
    Ok(Value::Object(map))
}
