//! Category-code table for video entries.
//!
//! Codes (`AA`, `AB`, ...) are assigned in the CMS; the table maps them to
//! display names. The table is an immutable value passed to whoever needs it.

use std::collections::BTreeMap;

use crate::error::CoreError;

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("AA", "General Spirituality (Meta-Spirituality)"),
    ("AB", "Enlightenment"),
    ("AC", "Religious Acceptance"),
    ("AD", "Philosophical Reasoning"),
    ("AE", "Reincarnation & the Soul"),
    ("AF", "Paranormal Abilities"),
    ("AG", "PAT (Paranormal Ability Training)"),
    ("AH", "Paranormal Entities"),
    ("AI", "Psychedelics"),
    ("AJ", "Law of Attraction"),
    ("AK", "Lifestyle Integration"),
    ("AL", "Conspiracies"),
];

/// Immutable mapping of category code to category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMap {
    names: BTreeMap<String, String>,
}

impl CategoryMap {
    /// Build a table from explicit code/name pairs.
    pub fn new(names: BTreeMap<String, String>) -> Self {
        Self { names }
    }

    /// Resolve a code to its display name.
    pub fn name(&self, code: &str) -> Result<&str, CoreError> {
        self.names
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| CoreError::CategoryNotFound {
                code: code.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new(
            DEFAULT_CATEGORIES
                .iter()
                .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AA", "General Spirituality (Meta-Spirituality)")]
    #[case("AF", "Paranormal Abilities")]
    #[case("AL", "Conspiracies")]
    fn default_table_resolves_known_codes(#[case] code: &str, #[case] expected: &str) {
        let map = CategoryMap::default();
        assert_eq!(map.name(code).unwrap(), expected);
    }

    #[rstest]
    #[case("ZZ")]
    #[case("--")]
    #[case("")]
    fn unknown_code_is_an_error(#[case] code: &str) {
        let err = CategoryMap::default().name(code).unwrap_err();
        assert!(matches!(err, CoreError::CategoryNotFound { .. }), "got: {err}");
    }

    #[test]
    fn custom_table_replaces_defaults() {
        let mut names = BTreeMap::new();
        names.insert("XA".to_string(), "Custom".to_string());
        let map = CategoryMap::new(names);
        assert_eq!(map.len(), 1);
        assert_eq!(map.name("XA").unwrap(), "Custom");
        assert!(map.name("AA").is_err());
    }
}
