use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Wire text for a lookup with no matching entry
pub const NOT_FOUND: &str = "Translation not found";

/// Outcome of translating one term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Lookup {
    Found(String),
    NotFound,
    SystemError(String),
}

impl Lookup {
    pub fn is_error(&self) -> bool {
        matches!(self, Lookup::SystemError(_))
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Found(value) => f.write_str(value),
            Lookup::NotFound => f.write_str(NOT_FOUND),
            Lookup::SystemError(reason) => write!(f, "Error: {reason}"),
        }
    }
}

/// Upper then lower, so results differing only by case collapse
pub fn fold_case(text: &str) -> String {
    text.to_uppercase().to_lowercase()
}

/// Case-fold, de-duplicate and sort batch results
pub fn collate<I>(results: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    results
        .into_iter()
        .map(|r| fold_case(r.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_wire_strings() {
        assert_eq!(Lookup::Found("cat".into()).to_string(), "cat");
        assert_eq!(Lookup::NotFound.to_string(), "Translation not found");
        assert_eq!(
            Lookup::SystemError("boom".into()).to_string(),
            "Error: boom"
        );
    }

    #[test]
    fn collate_sorts_and_dedups_case_insensitively() {
        let out = collate(["House", "cat", "house", "CAT", "apple"]);
        assert_eq!(out, vec!["apple", "cat", "house"]);
    }

    #[test]
    fn collate_of_nothing_is_empty() {
        assert!(collate(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn serializes_tagged() {
        let json = serde_json::to_value(Lookup::Found("cat".into())).unwrap();
        assert_eq!(json, serde_json::json!({"status": "found", "value": "cat"}));
    }
}
