//! Articles: table, list allow-lists and request payloads.

use crate::model::entity::{ColumnDef, ColumnDefault, ColumnType, EntityDef, CREATED_AT, ID, UPDATED_AT};
use crate::query::{AllowedField, RawCriterion, RawOrder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub static ARTICLES: EntityDef = EntityDef {
    label: "article",
    table: "articles",
    columns: &[
        ID,
        ColumnDef::new("title", ColumnType::Text),
        ColumnDef::new("description", ColumnType::Text),
        ColumnDef::new("md_url", ColumnType::Text),
        ColumnDef::new("tags", ColumnType::TextArray).default_to(ColumnDefault::EmptyArray),
        ColumnDef::new("likes", ColumnType::Int).default_to(ColumnDefault::Zero),
        ColumnDef::new("visits", ColumnType::Int).default_to(ColumnDefault::Zero),
        ColumnDef::new("author_id", ColumnType::Uuid).references("users"),
        ColumnDef::new("category_id", ColumnType::Uuid).references("categories"),
        CREATED_AT,
        UPDATED_AT,
    ],
};

/// Column holding article tags; target of the `hasEvery` predicate.
pub const TAGS_COLUMN: &str = "tags";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArticleSearchField {
    Title,
    Description,
}

impl AllowedField for ArticleSearchField {
    const ALL: &'static [Self] = &[ArticleSearchField::Title, ArticleSearchField::Description];

    fn name(self) -> &'static str {
        match self {
            ArticleSearchField::Title => "title",
            ArticleSearchField::Description => "description",
        }
    }

    fn column(self) -> &'static str {
        self.name()
    }
}

/// Filter fields; values must be uuids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArticleFilterField {
    AuthorId,
    CategoryId,
}

impl AllowedField for ArticleFilterField {
    const ALL: &'static [Self] = &[ArticleFilterField::AuthorId, ArticleFilterField::CategoryId];

    fn name(self) -> &'static str {
        match self {
            ArticleFilterField::AuthorId => "authorId",
            ArticleFilterField::CategoryId => "categoryId",
        }
    }

    fn column(self) -> &'static str {
        match self {
            ArticleFilterField::AuthorId => "author_id",
            ArticleFilterField::CategoryId => "category_id",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArticleSortField {
    Likes,
    Visits,
    CreatedAt,
    UpdatedAt,
}

impl AllowedField for ArticleSortField {
    const ALL: &'static [Self] = &[
        ArticleSortField::Likes,
        ArticleSortField::Visits,
        ArticleSortField::CreatedAt,
        ArticleSortField::UpdatedAt,
    ];

    fn name(self) -> &'static str {
        match self {
            ArticleSortField::Likes => "likes",
            ArticleSortField::Visits => "visits",
            ArticleSortField::CreatedAt => "createdAt",
            ArticleSortField::UpdatedAt => "updatedAt",
        }
    }

    fn column(self) -> &'static str {
        match self {
            ArticleSortField::Likes => "likes",
            ArticleSortField::Visits => "visits",
            ArticleSortField::CreatedAt => "created_at",
            ArticleSortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateArticle {
    pub title: String,
    pub description: String,
    pub md_url: String,
    pub tags: Vec<String>,
    // TODO: take the author from the authenticated caller once auth lands
    pub author_id: String,
    pub category_id: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArticlePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub md_url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArticlePageInput {
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<Vec<RawCriterion>>,
    #[serde(default)]
    pub filter: Option<Vec<RawCriterion>>,
    /// Every listed tag must be present on the article.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub order: Option<Vec<RawOrder>>,
}
