//! Users: table, list allow-lists and request payloads.

use crate::model::entity::{ColumnDef, ColumnType, EntityDef, CREATED_AT, ID, UPDATED_AT};
use crate::query::{AllowedField, RawCriterion, RawOrder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub static USERS: EntityDef = EntityDef {
    label: "user",
    table: "users",
    columns: &[
        ID,
        ColumnDef::new("phone", ColumnType::Text).nullable(),
        ColumnDef::new("username", ColumnType::Text).unique(),
        ColumnDef::new("email", ColumnType::Text).unique(),
        ColumnDef::new("avatar_url", ColumnType::Text).nullable(),
        ColumnDef::new("block_reason", ColumnType::Text).nullable(),
        ColumnDef::new("blocked_at", ColumnType::Timestamptz).nullable(),
        ColumnDef::new("deleted_at", ColumnType::Timestamptz).nullable(),
        CREATED_AT,
        UPDATED_AT,
    ],
};

/// Fields a user list may search or filter on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserField {
    Email,
    Username,
    Phone,
}

impl AllowedField for UserField {
    const ALL: &'static [Self] = &[UserField::Email, UserField::Username, UserField::Phone];

    fn name(self) -> &'static str {
        match self {
            UserField::Email => "email",
            UserField::Username => "username",
            UserField::Phone => "phone",
        }
    }

    fn column(self) -> &'static str {
        self.name()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserSortField {
    Email,
    Username,
    Phone,
    CreatedAt,
    UpdatedAt,
}

impl AllowedField for UserSortField {
    const ALL: &'static [Self] = &[
        UserSortField::Email,
        UserSortField::Username,
        UserSortField::Phone,
        UserSortField::CreatedAt,
        UserSortField::UpdatedAt,
    ];

    fn name(self) -> &'static str {
        match self {
            UserSortField::Email => "email",
            UserSortField::Username => "username",
            UserSortField::Phone => "phone",
            UserSortField::CreatedAt => "createdAt",
            UserSortField::UpdatedAt => "updatedAt",
        }
    }

    fn column(self) -> &'static str {
        match self {
            UserSortField::Email => "email",
            UserSortField::Username => "username",
            UserSortField::Phone => "phone",
            UserSortField::CreatedAt => "created_at",
            UserSortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUser {
    #[serde(default)]
    pub phone: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Partial update; only present fields are written.
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BlockUser {
    pub block_reason: String,
}

/// Exact-match lookup on any of the unique-ish user keys.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UserLookup {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// List request for users. `filter` is mandatory here, unlike articles.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPageInput {
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<Vec<RawCriterion>>,
    pub filter: Vec<RawCriterion>,
    #[serde(default)]
    pub order: Option<Vec<RawOrder>>,
}
