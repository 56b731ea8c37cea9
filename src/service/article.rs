use crate::case::row_to_wire;
use crate::error::AppError;
use crate::model::article::{ArticleFilterField, ArticleSearchField, ArticleSortField, TAGS_COLUMN};
use crate::model::{ArticlePageInput, ArticlePatch, CreateArticle, ARTICLES};
use crate::query::{build_query, AllowedField, PageRequest, Predicate};
use crate::service::validation::parse_uuid;
use crate::service::{found, Page};
use crate::store::{set_if_present, Record, Store};
use serde_json::Value;
use uuid::Uuid;

pub struct ArticleService;

impl ArticleService {
    pub async fn create(store: &dyn Store, input: CreateArticle) -> Result<Value, AppError> {
        let author_id = parse_uuid("authorId", &input.author_id)?;
        let category_id = parse_uuid("categoryId", &input.category_id)?;
        let mut record = Record::new();
        set_if_present(&mut record, "title", Some(input.title));
        set_if_present(&mut record, "description", Some(input.description));
        set_if_present(&mut record, "md_url", Some(input.md_url));
        set_if_present(&mut record, "tags", Some(input.tags));
        set_if_present(&mut record, "author_id", Some(author_id.to_string()));
        set_if_present(&mut record, "category_id", Some(category_id.to_string()));
        let row = store.insert(&ARTICLES, &record).await?;
        tracing::debug!(id = %row["id"], "article created");
        Ok(row_to_wire(row))
    }

    pub async fn update(store: &dyn Store, id: Uuid, patch: ArticlePatch) -> Result<Value, AppError> {
        let author_id = patch
            .author_id
            .as_deref()
            .map(|v| parse_uuid("authorId", v))
            .transpose()?;
        let category_id = patch
            .category_id
            .as_deref()
            .map(|v| parse_uuid("categoryId", v))
            .transpose()?;
        let mut record = Record::new();
        set_if_present(&mut record, "title", patch.title);
        set_if_present(&mut record, "description", patch.description);
        set_if_present(&mut record, "md_url", patch.md_url);
        set_if_present(&mut record, "tags", patch.tags);
        set_if_present(&mut record, "author_id", author_id.map(|u| u.to_string()));
        set_if_present(&mut record, "category_id", category_id.map(|u| u.to_string()));
        found(&ARTICLES, id, store.update(&ARTICLES, id, &record).await?)
    }

    pub async fn delete(store: &dyn Store, id: Uuid) -> Result<Value, AppError> {
        found(&ARTICLES, id, store.delete(&ARTICLES, id).await?)
    }

    pub async fn get(store: &dyn Store, id: Uuid) -> Result<Value, AppError> {
        found(&ARTICLES, id, store.find_by_id(&ARTICLES, id).await?)
    }

    /// Search on title/description, filter on author/category ids, require every tag in `tags`.
    pub async fn get_page(store: &dyn Store, input: ArticlePageInput) -> Result<Page, AppError> {
        let request = PageRequest::<ArticleSearchField, ArticleFilterField, ArticleSortField>::resolve(
            input.offset,
            input.limit,
            input.search.unwrap_or_default(),
            input.filter.unwrap_or_default(),
            input.order.unwrap_or_default(),
        )?;
        for item in &request.filter {
            parse_uuid(item.field.name(), &item.value)?;
        }
        let mut spec = build_query(&request);
        if let Some(tags) = input.tags {
            spec.predicates.set(TAGS_COLUMN, Predicate::HasEvery(tags));
        }
        tracing::debug!(predicates = spec.predicates.len(), sort_keys = spec.order.len(), "article page");
        let rows = store.find_many(&ARTICLES, &spec).await?;
        Ok(Page::new(rows, &spec))
    }
}
