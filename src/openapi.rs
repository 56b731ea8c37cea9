//! OpenAPI document for the `/api/v1` procedures.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::{article, category, locale, user};
use crate::locale::{Locale, LocaleBody};
use crate::model::{
    ArticlePageInput, ArticlePatch, BlockUser, CategoryPatch, CreateArticle, CreateCategory, CreateUser, UserLookup,
    UserPageInput, UserPatch,
};
use crate::query::{Direction, RawCriterion, RawOrder};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "blog-api", description = "Articles, categories, users and locale"),
    paths(
        user::create,
        user::read,
        user::update,
        user::delete,
        user::remove,
        user::restore,
        user::block,
        user::unblock,
        user::get_by,
        user::page,
        article::create,
        article::read,
        article::update,
        article::delete,
        article::page,
        category::create,
        category::list,
        category::read,
        category::update,
        category::delete,
        locale::get_locale,
        locale::set_locale,
    ),
    components(schemas(
        CreateUser,
        UserPatch,
        BlockUser,
        UserLookup,
        UserPageInput,
        CreateArticle,
        ArticlePatch,
        ArticlePageInput,
        CreateCategory,
        CategoryPatch,
        RawCriterion,
        RawOrder,
        Direction,
        Locale,
        LocaleBody,
        ErrorBody,
        ErrorDetail,
    )),
    tags(
        (name = "user", description = "User procedures"),
        (name = "article", description = "Article procedures"),
        (name = "category", description = "Category procedures"),
        (name = "locale", description = "Locale cookie"),
    )
)]
pub struct ApiDoc;
