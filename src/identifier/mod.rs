//! Book identifier handling
//!
//! Catalog search results carry a mix of identifier types. This module turns
//! them into the canonical 13-digit ISBN form used for every comparison and
//! every file name on disk.

mod normalize;

use serde::Deserialize;
use std::collections::HashSet;

pub use normalize::{is_isbn13_checksum_valid, normalize_isbn10};

/// Identifier type tag for 10-digit ISBNs, as reported by the catalog
pub const ISBN_10: &str = "ISBN_10";

/// Identifier type tag for 13-digit ISBNs, as reported by the catalog
pub const ISBN_13: &str = "ISBN_13";

/// One identifier entry attached to a catalog search result
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndustryIdentifier {
    /// Identifier type (`ISBN_10`, `ISBN_13`, `ISSN`, `OTHER`, ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Raw identifier value
    pub identifier: String,
}

impl IndustryIdentifier {
    pub fn new(kind: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            identifier: identifier.into(),
        }
    }
}

/// Collects canonical ISBN-13 identifiers from search entries
///
/// `ISBN_13` values are kept as-is, `ISBN_10` values are converted, and every
/// other identifier type is ignored. The result keeps first-seen order and
/// contains no duplicates, so a volume listing both forms of the same ISBN
/// yields a single identifier.
///
/// # Examples
///
/// ```
/// use isbn_harvest::identifier::{collect_identifiers, IndustryIdentifier};
///
/// let entries = vec![
///     IndustryIdentifier::new("ISBN_10", "0306406152"),
///     IndustryIdentifier::new("ISBN_13", "9780306406157"),
///     IndustryIdentifier::new("OTHER", "UOM:39015000000000"),
/// ];
/// assert_eq!(collect_identifiers(&entries), vec!["9780306406157".to_string()]);
/// ```
pub fn collect_identifiers(entries: &[IndustryIdentifier]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut identifiers = Vec::new();

    for entry in entries {
        let value = entry.identifier.trim();
        let canonical = match entry.kind.as_str() {
            ISBN_13 => value.to_string(),
            ISBN_10 => normalize_isbn10(value),
            _ => continue,
        };

        if canonical.is_empty() {
            continue;
        }

        if seen.insert(canonical.clone()) {
            identifiers.push(canonical);
        }
    }

    identifiers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_keeps_isbn13() {
        let entries = vec![IndustryIdentifier::new(ISBN_13, "9781234567897")];
        assert_eq!(collect_identifiers(&entries), vec!["9781234567897"]);
    }

    #[test]
    fn test_collect_normalizes_isbn10() {
        let entries = vec![IndustryIdentifier::new(ISBN_10, "0306406152")];
        assert_eq!(collect_identifiers(&entries), vec!["9780306406157"]);
    }

    #[test]
    fn test_collect_deduplicates_across_forms() {
        let entries = vec![
            IndustryIdentifier::new(ISBN_13, "9780306406157"),
            IndustryIdentifier::new(ISBN_10, "0306406152"),
            IndustryIdentifier::new(ISBN_13, "9780306406157"),
        ];
        assert_eq!(collect_identifiers(&entries), vec!["9780306406157"]);
    }

    #[test]
    fn test_collect_preserves_search_order() {
        let entries = vec![
            IndustryIdentifier::new(ISBN_13, "9781111111111"),
            IndustryIdentifier::new(ISBN_10, "0306406152"),
            IndustryIdentifier::new(ISBN_13, "9782222222222"),
        ];
        assert_eq!(
            collect_identifiers(&entries),
            vec!["9781111111111", "9780306406157", "9782222222222"]
        );
    }

    #[test]
    fn test_collect_ignores_other_types() {
        let entries = vec![
            IndustryIdentifier::new("ISSN", "03064061"),
            IndustryIdentifier::new("OTHER", "OCLC:12345"),
        ];
        assert!(collect_identifiers(&entries).is_empty());
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let entry: IndustryIdentifier =
            serde_json::from_str(r#"{"type": "ISBN_10", "identifier": "0306406152"}"#).unwrap();
        assert_eq!(entry.kind, ISBN_10);
        assert_eq!(entry.identifier, "0306406152");
    }
}
