pub mod article;
pub mod category;
pub mod entity;
pub mod user;

pub use article::{ArticlePageInput, ArticlePatch, CreateArticle, ARTICLES};
pub use category::{CategoryPatch, CreateCategory, CATEGORIES};
pub use entity::{ColumnDef, ColumnDefault, ColumnType, EntityDef};
pub use user::{BlockUser, CreateUser, UserLookup, UserPageInput, UserPatch, USERS};
