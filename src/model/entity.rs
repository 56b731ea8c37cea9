//! Static table descriptions shared by the SQL builder, the schema bootstrap and the in-memory store.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

/// Storage type of a column; drives SQL casts and row decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Uuid,
    Text,
    TextArray,
    Int,
    Timestamptz,
}

impl ColumnType {
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnType::Uuid => "uuid",
            ColumnType::Text => "text",
            ColumnType::TextArray => "text[]",
            ColumnType::Int => "integer",
            ColumnType::Timestamptz => "timestamptz",
        }
    }
}

/// Value the store fills in when an insert omits the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnDefault {
    GeneratedUuid,
    Now,
    Zero,
    EmptyArray,
}

impl ColumnDefault {
    pub fn sql(self) -> &'static str {
        match self {
            ColumnDefault::GeneratedUuid => "gen_random_uuid()",
            ColumnDefault::Now => "NOW()",
            ColumnDefault::Zero => "0",
            ColumnDefault::EmptyArray => "'{}'",
        }
    }

    pub fn value(self) -> Value {
        match self {
            ColumnDefault::GeneratedUuid => Value::String(uuid::Uuid::new_v4().to_string()),
            ColumnDefault::Now => Value::String(timestamp_now()),
            ColumnDefault::Zero => Value::from(0),
            ColumnDefault::EmptyArray => Value::Array(Vec::new()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    pub default: Option<ColumnDefault>,
    /// Table whose `id` this column points at.
    pub references: Option<&'static str>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        ColumnDef {
            name,
            ty,
            nullable: false,
            unique: false,
            default: None,
            references: None,
        }
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn default_to(mut self, default: ColumnDefault) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn references(mut self, table: &'static str) -> Self {
        self.references = Some(table);
        self
    }
}

#[derive(Debug)]
pub struct EntityDef {
    /// Singular name used in messages ("user", "article").
    pub label: &'static str,
    pub table: &'static str,
    pub columns: &'static [ColumnDef],
}

impl EntityDef {
    /// Every entity is keyed by a single uuid column of this name.
    pub const PK: &'static str = "id";

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

pub const ID: ColumnDef = ColumnDef::new(EntityDef::PK, ColumnType::Uuid).default_to(ColumnDefault::GeneratedUuid);
pub const CREATED_AT: ColumnDef = ColumnDef::new("created_at", ColumnType::Timestamptz).default_to(ColumnDefault::Now);
pub const UPDATED_AT: ColumnDef = ColumnDef::new("updated_at", ColumnType::Timestamptz).default_to(ColumnDefault::Now);

/// RFC 3339 with millisecond precision and a `Z` suffix, so timestamps also sort as strings.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
