//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from entity definitions and query specs.
//! Identifiers only ever come from static entity definitions; values are always parameters.

use crate::model::{ColumnDef, EntityDef};
use crate::query::{Predicate, QuerySpec};
use crate::store::Record;
use serde_json::Value;

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        Self::default()
    }

    fn push_param(&mut self, v: Value) -> u32 {
        self.params.push(v);
        self.params.len() as u32
    }

    /// Push a value and return its placeholder cast to the column's type.
    fn push_typed(&mut self, column: &ColumnDef, v: Value) -> String {
        let n = self.push_param(v);
        format!("${}::{}", n, column.ty.pg_type())
    }
}

fn select_column_list(entity: &EntityDef) -> String {
    entity
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn id_column(entity: &EntityDef) -> &ColumnDef {
    entity
        .column(EntityDef::PK)
        .unwrap_or(&crate::model::entity::ID)
}

/// Escape LIKE wildcards so a search value only ever matches literally.
fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// SELECT by primary key. Caller binds the id as sole param.
pub fn select_by_id(entity: &EntityDef, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_typed(id_column(entity), Value::String(id.to_string()));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(entity),
        quoted(entity.table),
        quoted(EntityDef::PK),
        ph
    );
    q
}

/// SELECT list: WHERE from the predicate map (AND-ed), ORDER BY from the sort keys, then LIMIT/OFFSET.
/// Predicates on columns the entity does not have are skipped.
pub fn select_list(entity: &EntityDef, spec: &QuerySpec) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (col, predicate) in spec.predicates.iter() {
        let Some(column) = entity.column(col) else {
            tracing::warn!(table = entity.table, column = col, "predicate on unknown column skipped");
            continue;
        };
        let part = match predicate {
            Predicate::Equals(v) => {
                let ph = q.push_typed(column, Value::String(v.clone()));
                format!("{} = {}", quoted(col), ph)
            }
            Predicate::Contains(v) => {
                let n = q.push_param(Value::String(like_pattern(v)));
                format!("{} LIKE ${}", quoted(col), n)
            }
            Predicate::HasEvery(tags) => {
                let ph = q.push_typed(column, Value::from(tags.clone()));
                format!("{} @> {}", quoted(col), ph)
            }
        };
        where_parts.push(part);
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let order_parts: Vec<String> = spec
        .order
        .iter()
        .filter(|(col, _)| entity.column(col).is_some())
        .map(|(col, dir)| format!("{} {}", quoted(col), dir.as_sql()))
        .collect();
    let order_clause = if order_parts.is_empty() {
        String::new()
    } else {
        format!(" ORDER BY {}", order_parts.join(", "))
    };
    let limit_clause = spec.limit.map(|n| format!(" LIMIT {}", n)).unwrap_or_default();
    let offset_clause = if spec.offset > 0 {
        format!(" OFFSET {}", spec.offset)
    } else {
        String::new()
    };

    q.sql = format!(
        "SELECT {} FROM {}{}{}{}{}",
        select_column_list(entity),
        quoted(entity.table),
        where_clause,
        order_clause,
        limit_clause,
        offset_clause
    );
    q
}

/// INSERT: one placeholder per column present in `values`; omitted columns take their DB default.
pub fn insert(entity: &EntityDef, values: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in entity.columns {
        let Some(val) = values.get(c.name) else { continue };
        placeholders.push(q.push_typed(c, val.clone()));
        cols.push(quoted(c.name));
    }
    let returning = select_column_list(entity);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", quoted(entity.table), returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(entity.table),
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by id: SET only columns present in `values` (never the id), always bumping `updated_at`.
pub fn update(entity: &EntityDef, id: &str, values: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in entity.columns {
        if c.name == EntityDef::PK || c.name == "updated_at" {
            continue;
        }
        let Some(val) = values.get(c.name) else { continue };
        let rhs = q.push_typed(c, val.clone());
        sets.push(format!("{} = {}", quoted(c.name), rhs));
    }
    if entity.column("updated_at").is_some() {
        sets.push(format!("{} = NOW()", quoted("updated_at")));
    }
    let id_ph = q.push_typed(id_column(entity), Value::String(id.to_string()));
    if sets.is_empty() {
        q.sql = format!(
            "SELECT {} FROM {} WHERE {} = {}",
            select_column_list(entity),
            quoted(entity.table),
            quoted(EntityDef::PK),
            id_ph
        );
        return q;
    }
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(entity.table),
        sets.join(", "),
        quoted(EntityDef::PK),
        id_ph,
        select_column_list(entity)
    );
    q
}

/// DELETE by id, returning the removed row.
pub fn delete(entity: &EntityDef, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_typed(id_column(entity), Value::String(id.to_string()));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        quoted(entity.table),
        quoted(EntityDef::PK),
        ph,
        select_column_list(entity)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ARTICLES, CATEGORIES, USERS};
    use crate::query::{Direction, PredicateMap};
    use serde_json::json;

    #[test]
    fn list_without_constraints_only_pages() {
        let spec = QuerySpec {
            limit: Some(10),
            ..QuerySpec::default()
        };
        let q = select_list(&CATEGORIES, &spec);
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"title\", \"description\", \"parent_id\", \"created_at\", \"updated_at\" FROM \"categories\" LIMIT 10"
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn list_binds_predicates_in_map_order() {
        let mut predicates = PredicateMap::new();
        predicates.set("author_id", Predicate::Equals("6f1c1a52-8d0e-4c59-a7a6-6b0e0f3f3f01".into()));
        predicates.set("title", Predicate::Contains("50%_off".into()));
        predicates.set("tags", Predicate::HasEvery(vec!["rust".into()]));
        let mut spec = QuerySpec {
            predicates,
            offset: 20,
            limit: Some(5),
            ..QuerySpec::default()
        };
        spec.order.set("likes", Direction::Desc);
        let q = select_list(&ARTICLES, &spec);
        assert!(q.sql.ends_with(
            "FROM \"articles\" WHERE \"author_id\" = $1::uuid AND \"title\" LIKE $2 AND \"tags\" @> $3::text[] ORDER BY \"likes\" DESC LIMIT 5 OFFSET 20"
        ));
        assert_eq!(q.params[1], json!("%50\\%\\_off%"));
        assert_eq!(q.params[2], json!(["rust"]));
    }

    #[test]
    fn update_sets_present_columns_and_bumps_timestamp() {
        let mut values = Record::new();
        values.insert("email".into(), json!("a@b.com"));
        values.insert("id".into(), json!("ignored"));
        let q = update(&USERS, "6f1c1a52-8d0e-4c59-a7a6-6b0e0f3f3f01", &values);
        assert!(q.sql.starts_with(
            "UPDATE \"users\" SET \"email\" = $1::text, \"updated_at\" = NOW() WHERE \"id\" = $2::uuid RETURNING"
        ));
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn insert_omits_absent_columns() {
        let mut values = Record::new();
        values.insert("title".into(), json!("News"));
        values.insert("description".into(), json!(""));
        let q = insert(&CATEGORIES, &values);
        assert!(q.sql.starts_with(
            "INSERT INTO \"categories\" (\"title\", \"description\") VALUES ($1::text, $2::text) RETURNING"
        ));
    }
}
