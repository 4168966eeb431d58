//! Search query derivation from file names
//!
//! Downloaded books tend to carry uploader or site tags in their names
//! (`"Dune (Z-Library)"`, `"[ebook] Dune"`). Those tags pollute catalog
//! searches, so every configured noise pattern is stripped before the title
//! is used as a query.

use crate::ConfigError;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Empty bracket pairs, e.g. the `()` in `"Dune ()"`
static EMPTY_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\)|\[\s*\]|\{\s*\}").unwrap());

/// Compiled set of noise patterns
///
/// All patterns are joined into a single case-insensitive alternation. With
/// no patterns configured nothing is ever stripped.
#[derive(Debug, Clone, Default)]
pub struct NoiseFilter {
    alternation: Option<Regex>,
}

impl NoiseFilter {
    /// Compiles the given patterns into one filter
    ///
    /// Blank patterns are ignored. Any pattern that fails to compile is
    /// reported as [`ConfigError::InvalidPattern`].
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let parts: Vec<String> = patterns
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .map(|p| {
                Regex::new(p)
                    .map(|_| format!("(?:{})", p))
                    .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", p, e)))
            })
            .collect::<Result<_, _>>()?;

        if parts.is_empty() {
            return Ok(Self::default());
        }

        let alternation = RegexBuilder::new(&parts.join("|"))
            .case_insensitive(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            alternation: Some(alternation),
        })
    }

    /// Returns true if no pattern is configured
    pub fn is_empty(&self) -> bool {
        self.alternation.is_none()
    }

    /// Derives the search query for a raw title
    ///
    /// Every match is removed and the result is trimmed. A bracket pair that
    /// only became empty because a match inside it was removed is dropped as
    /// well; brackets that were already empty are kept.
    pub fn apply(&self, raw_title: &str) -> String {
        let Some(alternation) = &self.alternation else {
            return raw_title.trim().to_string();
        };

        // Offsets in `stripped` where a match was cut out
        let mut cuts = Vec::new();
        let mut stripped = String::with_capacity(raw_title.len());
        let mut last = 0;
        for m in alternation.find_iter(raw_title) {
            stripped.push_str(&raw_title[last..m.start()]);
            cuts.push(stripped.len());
            last = m.end();
        }
        if cuts.is_empty() {
            return raw_title.trim().to_string();
        }
        stripped.push_str(&raw_title[last..]);

        let mut cleaned = String::with_capacity(stripped.len());
        let mut last = 0;
        for pair in EMPTY_BRACKETS.find_iter(&stripped) {
            if cuts.iter().any(|&cut| cut > pair.start() && cut < pair.end()) {
                cleaned.push_str(&stripped[last..pair.start()]);
                last = pair.end();
            }
        }
        cleaned.push_str(&stripped[last..]);

        cleaned.trim().to_string()
    }
}

/// Builds a search query from a raw title and a list of noise patterns
///
/// Convenience wrapper around [`NoiseFilter`] for one-off use; the crawl loop
/// compiles the filter once and reuses it.
///
/// # Examples
///
/// ```
/// use isbn_harvest::query::build_query;
///
/// let query = build_query("Dune (z-library)", &[r"\(Z-Library\)"]).unwrap();
/// assert_eq!(query, "Dune");
/// ```
pub fn build_query<S: AsRef<str>>(raw_title: &str, noise_patterns: &[S]) -> Result<String, ConfigError> {
    Ok(NoiseFilter::new(noise_patterns)?.apply(raw_title))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_PATTERNS: [&str; 0] = [];

    #[test]
    fn test_no_patterns_only_trims() {
        for title in ["Dune", "  Dune  ", "Dune (z-library)", "[ebook] Foo ()", ""] {
            assert_eq!(build_query(title, &NO_PATTERNS).unwrap(), title.trim());
        }
    }

    #[test]
    fn test_strips_case_insensitively() {
        let query = build_query("Dune (z-library)", &["(Z-Library)"]).unwrap();
        assert_eq!(query, "Dune");
    }

    #[test]
    fn test_strips_escaped_pattern() {
        let query = build_query("Dune (Z-LIBRARY)", &[r"\(Z-Library\)"]).unwrap();
        assert_eq!(query, "Dune");
    }

    #[test]
    fn test_strips_every_pattern_and_every_match() {
        let patterns = [r"z-lib\.org", r"\[.*?\]"];
        let query = build_query("[ebook] Neuromancer z-lib.org [v2] Z-LIB.ORG", &patterns).unwrap();
        assert_eq!(query, "Neuromancer");
    }

    #[test]
    fn test_all_noise_yields_empty_query() {
        let query = build_query("(Z-Library)", &[r"\(Z-Library\)"]).unwrap();
        assert_eq!(query, "");
    }

    #[test]
    fn test_untouched_brackets_are_kept() {
        let query = build_query("Foundation () z-lib.org", &[r"nomatch"]).unwrap();
        assert_eq!(query, "Foundation () z-lib.org");
    }

    #[test]
    fn test_preexisting_empty_brackets_survive_removal() {
        let query = build_query("Notes () z-lib.org", &[r"z-lib\.org"]).unwrap();
        assert_eq!(query, "Notes ()");
    }

    #[test]
    fn test_brackets_emptied_by_several_matches() {
        let query = build_query("Dune [z-lib.org libgen] ()", &[r"z-lib\.org", "libgen"]).unwrap();
        assert_eq!(query, "Dune  ()");
    }

    #[test]
    fn test_alternation_is_isolated_per_pattern() {
        // Without grouping, "a|b" followed by "c" would become "a|bc"
        let query = build_query("xa yb zc", &["a|b", "c"]).unwrap();
        assert_eq!(query, "x y z");
    }

    #[test]
    fn test_blank_patterns_ignored() {
        let filter = NoiseFilter::new(&["", "   "]).unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(" Dune "), "Dune");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = NoiseFilter::new(&["(unclosed"]);
        assert!(matches!(result, Err(ConfigError::InvalidPattern(_))));
    }
}
