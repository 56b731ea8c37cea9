//! Categories: table and request payloads. Categories are listed whole, without paging.

use crate::model::entity::{ColumnDef, ColumnType, EntityDef, CREATED_AT, ID, UPDATED_AT};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub static CATEGORIES: EntityDef = EntityDef {
    label: "category",
    table: "categories",
    columns: &[
        ID,
        ColumnDef::new("title", ColumnType::Text),
        ColumnDef::new("description", ColumnType::Text),
        ColumnDef::new("parent_id", ColumnType::Uuid).nullable().references("categories"),
        CREATED_AT,
        UPDATED_AT,
    ],
};

pub const TITLE_MAX_CHARS: usize = 128;

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCategory {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}
