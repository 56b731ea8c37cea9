//! Table bootstrap for PostgreSQL. Idempotent: every statement is `IF NOT EXISTS`.

use crate::error::AppError;
use crate::model::{EntityDef, ARTICLES, CATEGORIES, USERS};
use sqlx::PgPool;

/// Creation order follows foreign keys: articles point at users and categories.
static TABLES: [&EntityDef; 3] = [&USERS, &CATEGORIES, &ARTICLES];

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// `CREATE TABLE IF NOT EXISTS` statement for one entity.
pub fn table_ddl(entity: &EntityDef) -> String {
    let col_defs: Vec<String> = entity
        .columns
        .iter()
        .map(|c| {
            let mut def = format!("{} {}", quote(c.name), c.ty.pg_type());
            if c.name == EntityDef::PK {
                def.push_str(" PRIMARY KEY");
            } else if !c.nullable {
                def.push_str(" NOT NULL");
            }
            if c.unique {
                def.push_str(" UNIQUE");
            }
            if let Some(d) = c.default {
                def.push_str(" DEFAULT ");
                def.push_str(d.sql());
            }
            if let Some(target) = c.references {
                def.push_str(&format!(" REFERENCES {}({})", quote(target), quote(EntityDef::PK)));
            }
            def
        })
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        quote(entity.table),
        col_defs.join(",\n    ")
    )
}

/// Create every table the API serves if missing.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for entity in TABLES {
        let ddl = table_ddl(entity);
        tracing::debug!(table = entity.table, "ensure table");
        sqlx::query(&ddl).execute(pool).await?;
    }
    let tags_index = format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} USING GIN ({})",
        quote("articles_tags_idx"),
        quote(ARTICLES.table),
        quote("tags")
    );
    sqlx::query(&tags_index).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_ddl_declares_defaults_and_references() {
        let ddl = table_ddl(&ARTICLES);
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS \"articles\""));
        assert!(ddl.contains("\"id\" uuid PRIMARY KEY DEFAULT gen_random_uuid()"));
        assert!(ddl.contains("\"tags\" text[] NOT NULL DEFAULT '{}'"));
        assert!(ddl.contains("\"author_id\" uuid NOT NULL REFERENCES \"users\"(\"id\")"));
    }

    #[test]
    fn user_ddl_marks_unique_and_nullable() {
        let ddl = table_ddl(&USERS);
        assert!(ddl.contains("\"email\" text NOT NULL UNIQUE"));
        assert!(ddl.contains("\"phone\" text,") || ddl.contains("\"phone\" text\n"));
    }
}
