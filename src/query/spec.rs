//! Normalized list query handed to the store: predicates, sort keys and page window.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Condition on a single column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// Exact match.
    Equals(String),
    /// Substring match, case-sensitive.
    Contains(String),
    /// Array column holds every listed element.
    HasEvery(Vec<String>),
}

/// Column -> predicate, at most one entry per column, in first-insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredicateMap {
    entries: Vec<(&'static str, Predicate)>,
}

impl PredicateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&Predicate> {
        self.entries.iter().find(|(c, _)| *c == column).map(|(_, p)| p)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Insert or replace the predicate for `column`.
    pub fn set(&mut self, column: &'static str, predicate: Predicate) {
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = predicate,
            None => self.entries.push((column, predicate)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Predicate)> + '_ {
        self.entries.iter().map(|(c, p)| (*c, p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered sort keys. A repeated column keeps its first position and takes the latest direction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortKeys {
    keys: Vec<(&'static str, Direction)>,
}

impl SortKeys {
    pub fn set(&mut self, column: &'static str, direction: Direction) {
        match self.keys.iter_mut().find(|(c, _)| *c == column) {
            Some(key) => key.1 = direction,
            None => self.keys.push((column, direction)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Direction)> + '_ {
        self.keys.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuerySpec {
    pub predicates: PredicateMap,
    pub order: SortKeys,
    pub offset: u32,
    /// `None` reads every matching row.
    pub limit: Option<u32>,
}

impl QuerySpec {
    /// Unconstrained, unpaged query.
    pub fn all() -> Self {
        Self::default()
    }

    /// First row matching `predicates`.
    pub fn first(predicates: PredicateMap) -> Self {
        QuerySpec {
            predicates,
            limit: Some(1),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicate_set_replaces_in_place() {
        let mut map = PredicateMap::new();
        map.set("email", Predicate::Contains("a".into()));
        map.set("phone", Predicate::Equals("1".into()));
        map.set("email", Predicate::Equals("a@b.com".into()));
        let cols: Vec<_> = map.iter().map(|(c, _)| c).collect();
        assert_eq!(cols, ["email", "phone"]);
        assert_eq!(map.get("email"), Some(&Predicate::Equals("a@b.com".into())));
    }

    #[test]
    fn direction_deserializes_lowercase() {
        let d: Direction = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(d, Direction::Desc);
        assert!(serde_json::from_str::<Direction>("\"DESC\"").is_err());
    }
}
