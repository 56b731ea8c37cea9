//! Per-entity field allow-lists.

use std::fmt::Debug;

/// A closed set of fields one list operation may reference.
///
/// Each entity declares separate enums for its searchable, filterable and
/// sortable fields, so a request can only ever name a column the operation
/// allows; anything else fails to parse at the validation boundary.
pub trait AllowedField: Copy + Eq + Debug + Send + Sync + 'static {
    /// Every member of the allow-list.
    const ALL: &'static [Self];

    /// Name accepted on the wire (camelCase, as clients send it).
    fn name(self) -> &'static str;

    /// Storage column the field maps to.
    fn column(self) -> &'static str;

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::AllowedField;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Color {
        Red,
        DarkBlue,
    }

    impl AllowedField for Color {
        const ALL: &'static [Self] = &[Color::Red, Color::DarkBlue];

        fn name(self) -> &'static str {
            match self {
                Color::Red => "red",
                Color::DarkBlue => "darkBlue",
            }
        }

        fn column(self) -> &'static str {
            match self {
                Color::Red => "red",
                Color::DarkBlue => "dark_blue",
            }
        }
    }

    #[test]
    fn parse_accepts_wire_names_only() {
        assert_eq!(Color::parse("darkBlue"), Some(Color::DarkBlue));
        assert_eq!(Color::parse("dark_blue"), None);
        assert_eq!(Color::parse("green"), None);
    }
}
