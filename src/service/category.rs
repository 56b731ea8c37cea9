use crate::case::row_to_wire;
use crate::error::AppError;
use crate::model::category::TITLE_MAX_CHARS;
use crate::model::{CategoryPatch, CreateCategory, CATEGORIES};
use crate::query::QuerySpec;
use crate::service::validation::{parse_uuid, validate_length};
use crate::service::{found, Page};
use crate::store::{set_if_present, Record, Store};
use serde_json::Value;
use uuid::Uuid;

pub struct CategoryService;

impl CategoryService {
    pub async fn create(store: &dyn Store, input: CreateCategory) -> Result<Value, AppError> {
        validate_length("title", &input.title, 1, TITLE_MAX_CHARS)?;
        let parent_id = input
            .parent_id
            .as_deref()
            .map(|v| parse_uuid("parentId", v))
            .transpose()?;
        let mut record = Record::new();
        set_if_present(&mut record, "title", Some(input.title));
        set_if_present(&mut record, "description", Some(input.description));
        set_if_present(&mut record, "parent_id", parent_id.map(|u| u.to_string()));
        let row = store.insert(&CATEGORIES, &record).await?;
        Ok(row_to_wire(row))
    }

    pub async fn update(store: &dyn Store, id: Uuid, patch: CategoryPatch) -> Result<Value, AppError> {
        if let Some(title) = &patch.title {
            validate_length("title", title, 1, TITLE_MAX_CHARS)?;
        }
        let parent_id = patch
            .parent_id
            .as_deref()
            .map(|v| parse_uuid("parentId", v))
            .transpose()?;
        if parent_id == Some(id) {
            return Err(AppError::Validation("a category cannot be its own parent".into()));
        }
        let mut record = Record::new();
        set_if_present(&mut record, "title", patch.title);
        set_if_present(&mut record, "description", patch.description);
        set_if_present(&mut record, "parent_id", parent_id.map(|u| u.to_string()));
        found(&CATEGORIES, id, store.update(&CATEGORIES, id, &record).await?)
    }

    // TODO: decide whether deleting a category cascades to its articles or is refused while any exist
    pub async fn delete(store: &dyn Store, id: Uuid) -> Result<Value, AppError> {
        found(&CATEGORIES, id, store.delete(&CATEGORIES, id).await?)
    }

    pub async fn get(store: &dyn Store, id: Uuid) -> Result<Value, AppError> {
        found(&CATEGORIES, id, store.find_by_id(&CATEGORIES, id).await?)
    }

    /// Every category, unpaged.
    pub async fn get_all(store: &dyn Store) -> Result<Page, AppError> {
        let spec = QuerySpec::all();
        let rows = store.find_many(&CATEGORIES, &spec).await?;
        Ok(Page::new(rows, &spec))
    }
}
