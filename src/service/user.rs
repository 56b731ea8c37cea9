use crate::case::row_to_wire;
use crate::error::AppError;
use crate::model::entity::timestamp_now;
use crate::model::user::{UserField, UserSortField};
use crate::model::{BlockUser, CreateUser, UserLookup, UserPageInput, UserPatch, USERS};
use crate::query::{build_query, AllowedField, PageRequest, Predicate, PredicateMap};
use crate::service::validation::validate_email;
use crate::service::{found, Page};
use crate::store::{set_if_present, Record, Store};
use serde_json::Value;
use uuid::Uuid;

pub struct UserService;

impl UserService {
    pub async fn create(store: &dyn Store, input: CreateUser) -> Result<Value, AppError> {
        validate_email("email", &input.email)?;
        let mut record = Record::new();
        set_if_present(&mut record, "phone", input.phone);
        set_if_present(&mut record, "username", Some(input.username));
        set_if_present(&mut record, "email", Some(input.email));
        set_if_present(&mut record, "avatar_url", input.avatar_url);
        let row = store.insert(&USERS, &record).await?;
        tracing::debug!(id = %row["id"], "user created");
        Ok(row_to_wire(row))
    }

    /// Apply only the fields present in `patch`.
    pub async fn update(store: &dyn Store, id: Uuid, patch: UserPatch) -> Result<Value, AppError> {
        if let Some(email) = &patch.email {
            validate_email("email", email)?;
        }
        let mut record = Record::new();
        set_if_present(&mut record, "phone", patch.phone);
        set_if_present(&mut record, "username", patch.username);
        set_if_present(&mut record, "email", patch.email);
        set_if_present(&mut record, "avatar_url", patch.avatar_url);
        let row = store.update(&USERS, id, &record).await?;
        found(&USERS, id, row)
    }

    /// Soft delete: stamps `deleted_at`, the row stays readable.
    pub async fn remove(store: &dyn Store, id: Uuid) -> Result<Value, AppError> {
        let mut record = Record::new();
        record.insert("deleted_at".into(), Value::String(timestamp_now()));
        found(&USERS, id, store.update(&USERS, id, &record).await?)
    }

    pub async fn restore(store: &dyn Store, id: Uuid) -> Result<Value, AppError> {
        let mut record = Record::new();
        record.insert("deleted_at".into(), Value::Null);
        found(&USERS, id, store.update(&USERS, id, &record).await?)
    }

    /// Hard delete; returns the removed row.
    pub async fn delete(store: &dyn Store, id: Uuid) -> Result<Value, AppError> {
        found(&USERS, id, store.delete(&USERS, id).await?)
    }

    pub async fn block(store: &dyn Store, id: Uuid, input: BlockUser) -> Result<Value, AppError> {
        let mut record = Record::new();
        record.insert("block_reason".into(), Value::String(input.block_reason));
        record.insert("blocked_at".into(), Value::String(timestamp_now()));
        found(&USERS, id, store.update(&USERS, id, &record).await?)
    }

    pub async fn unblock(store: &dyn Store, id: Uuid) -> Result<Value, AppError> {
        let mut record = Record::new();
        record.insert("block_reason".into(), Value::Null);
        record.insert("blocked_at".into(), Value::Null);
        found(&USERS, id, store.update(&USERS, id, &record).await?)
    }

    pub async fn get(store: &dyn Store, id: Uuid) -> Result<Value, AppError> {
        found(&USERS, id, store.find_by_id(&USERS, id).await?)
    }

    /// First user matching every non-empty key. With no keys there is nothing to match: `None`.
    pub async fn get_by(store: &dyn Store, lookup: UserLookup) -> Result<Option<Value>, AppError> {
        let keys = [
            (UserField::Email, lookup.email),
            (UserField::Username, lookup.username),
            (UserField::Phone, lookup.phone),
        ];
        let mut predicates = PredicateMap::new();
        for (field, value) in keys {
            let Some(value) = value.filter(|v| !v.is_empty()) else { continue };
            if field == UserField::Email {
                validate_email("email", &value)?;
            }
            predicates.set(field.column(), Predicate::Equals(value));
        }
        if predicates.is_empty() {
            return Ok(None);
        }
        Ok(store.find_first(&USERS, &predicates).await?.map(row_to_wire))
    }

    pub async fn get_page(store: &dyn Store, input: UserPageInput) -> Result<Page, AppError> {
        let request = PageRequest::<UserField, UserField, UserSortField>::resolve(
            input.offset,
            input.limit,
            input.search.unwrap_or_default(),
            input.filter,
            input.order.unwrap_or_default(),
        )?;
        let spec = build_query(&request);
        tracing::debug!(predicates = spec.predicates.len(), sort_keys = spec.order.len(), "user page");
        let rows = store.find_many(&USERS, &spec).await?;
        Ok(Page::new(rows, &spec))
    }
}
