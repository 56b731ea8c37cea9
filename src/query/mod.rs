//! Allow-listed list queries: request validation and the store-facing query descriptor.

mod builder;
pub mod field;
pub mod request;
pub mod spec;

pub use builder::build_query;
pub use field::AllowedField;
pub use request::{Criterion, OrderBy, PageRequest, RawCriterion, RawOrder};
pub use spec::{Direction, Predicate, PredicateMap, QuerySpec, SortKeys, DEFAULT_LIMIT, MAX_LIMIT};
