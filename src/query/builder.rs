//! Turns a validated list request into a [`QuerySpec`].

use crate::query::field::AllowedField;
use crate::query::request::PageRequest;
use crate::query::spec::{Predicate, PredicateMap, QuerySpec, SortKeys, DEFAULT_LIMIT, MAX_LIMIT};

/// Build the store query for a list request.
///
/// Filters are applied first as equality predicates (a repeated field keeps
/// the last value). Search entries become substring predicates only for
/// columns that have no predicate yet, so an equality filter always wins over
/// a search on the same column. Sort keys follow request order.
pub fn build_query<S, F, O>(request: &PageRequest<S, F, O>) -> QuerySpec
where
    S: AllowedField,
    F: AllowedField,
    O: AllowedField,
{
    let mut predicates = PredicateMap::new();
    for item in &request.filter {
        predicates.set(item.field.column(), Predicate::Equals(item.value.clone()));
    }
    for item in &request.search {
        let column = item.field.column();
        if predicates.contains(column) {
            continue;
        }
        predicates.set(column, Predicate::Contains(item.value.clone()));
    }

    let mut order = SortKeys::default();
    for item in &request.order {
        order.set(item.field.column(), item.direction);
    }

    QuerySpec {
        predicates,
        order,
        offset: request.offset.unwrap_or(0),
        limit: Some(request.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::field::testing::Color;
    use crate::query::request::{Criterion, OrderBy};
    use crate::query::spec::Direction;

    type Req = PageRequest<Color, Color, Color>;

    fn crit(field: Color, value: &str) -> Criterion<Color> {
        Criterion {
            field,
            value: value.into(),
        }
    }

    #[test]
    fn empty_request_is_unconstrained_with_default_page() {
        let spec = build_query(&Req::default());
        assert!(spec.predicates.is_empty());
        assert!(spec.order.is_empty());
        assert_eq!(spec.offset, 0);
        assert_eq!(spec.limit, Some(10));
    }

    #[test]
    fn filter_wins_over_search_regardless_of_order() {
        let req = Req {
            search: vec![crit(Color::Red, "a"), crit(Color::DarkBlue, "b")],
            filter: vec![crit(Color::Red, "exact")],
            ..Req::default()
        };
        let spec = build_query(&req);
        assert_eq!(spec.predicates.get("red"), Some(&Predicate::Equals("exact".into())));
        assert_eq!(spec.predicates.get("dark_blue"), Some(&Predicate::Contains("b".into())));
        assert_eq!(spec.predicates.len(), 2);
    }

    #[test]
    fn repeated_filter_keeps_last_value() {
        let req = Req {
            filter: vec![crit(Color::Red, "one"), crit(Color::Red, "two")],
            ..Req::default()
        };
        let spec = build_query(&req);
        assert_eq!(spec.predicates.get("red"), Some(&Predicate::Equals("two".into())));
    }

    #[test]
    fn repeated_search_keeps_first_value() {
        let req = Req {
            search: vec![crit(Color::Red, "one"), crit(Color::Red, "two")],
            ..Req::default()
        };
        let spec = build_query(&req);
        assert_eq!(spec.predicates.get("red"), Some(&Predicate::Contains("one".into())));
    }

    #[test]
    fn empty_filter_value_still_blocks_search() {
        let req = Req {
            search: vec![crit(Color::Red, "x")],
            filter: vec![crit(Color::Red, "")],
            ..Req::default()
        };
        let spec = build_query(&req);
        assert_eq!(spec.predicates.get("red"), Some(&Predicate::Equals(String::new())));
    }

    #[test]
    fn repeated_sort_field_takes_final_direction() {
        let req = Req {
            order: vec![
                OrderBy { field: Color::DarkBlue, direction: Direction::Asc },
                OrderBy { field: Color::Red, direction: Direction::Asc },
                OrderBy { field: Color::DarkBlue, direction: Direction::Desc },
            ],
            ..Req::default()
        };
        let keys: Vec<_> = build_query(&req).order.iter().collect();
        assert_eq!(keys, vec![("dark_blue", Direction::Desc), ("red", Direction::Asc)]);
    }

    #[test]
    fn limit_is_clamped() {
        let req = Req {
            offset: Some(20),
            limit: Some(50_000),
            ..Req::default()
        };
        let spec = build_query(&req);
        assert_eq!(spec.offset, 20);
        assert_eq!(spec.limit, Some(MAX_LIMIT));
    }
}
