//! Wire-level list request entries and their validation against an allow-list.

use crate::error::AppError;
use crate::query::field::AllowedField;
use crate::query::spec::Direction;
use serde::Deserialize;
use utoipa::ToSchema;

/// `{ "field": ..., "value": ... }` as sent by clients, field not yet checked.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RawCriterion {
    pub field: String,
    pub value: String,
}

/// `{ "field": ..., "direction": "asc" | "desc" }`, field not yet checked.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RawOrder {
    pub field: String,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Criterion<F> {
    pub field: F,
    pub value: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderBy<F> {
    pub field: F,
    pub direction: Direction,
}

/// Validated list request: every field is a member of its allow-list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest<S, F, O> {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub search: Vec<Criterion<S>>,
    pub filter: Vec<Criterion<F>>,
    pub order: Vec<OrderBy<O>>,
}

impl<S, F, O> Default for PageRequest<S, F, O> {
    fn default() -> Self {
        PageRequest {
            offset: None,
            limit: None,
            search: Vec::new(),
            filter: Vec::new(),
            order: Vec::new(),
        }
    }
}

fn resolve_field<F: AllowedField>(kind: &'static str, name: &str) -> Result<F, AppError> {
    F::parse(name).ok_or_else(|| AppError::InvalidField {
        kind,
        field: name.to_string(),
    })
}

fn resolve_criteria<F: AllowedField>(kind: &'static str, raw: Vec<RawCriterion>) -> Result<Vec<Criterion<F>>, AppError> {
    raw.into_iter()
        .map(|c| -> Result<Criterion<F>, AppError> {
            Ok(Criterion {
                field: resolve_field(kind, &c.field)?,
                value: c.value,
            })
        })
        .collect()
}

impl<S: AllowedField, F: AllowedField, O: AllowedField> PageRequest<S, F, O> {
    /// Check every entry against the allow-lists and the page window.
    /// Fails on the first unknown field; nothing reaches the store in that case.
    pub fn resolve(
        offset: Option<u32>,
        limit: Option<u32>,
        search: Vec<RawCriterion>,
        filter: Vec<RawCriterion>,
        order: Vec<RawOrder>,
    ) -> Result<Self, AppError> {
        if limit == Some(0) {
            return Err(AppError::Validation("limit must be positive".into()));
        }
        let search = resolve_criteria("search", search)?;
        let filter = resolve_criteria("filter", filter)?;
        let order = order
            .into_iter()
            .map(|o| -> Result<OrderBy<O>, AppError> {
                Ok(OrderBy {
                    field: resolve_field("order", &o.field)?,
                    direction: o.direction,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PageRequest {
            offset,
            limit,
            search,
            filter,
            order,
        })
    }
}
