//! Eligibility predicates for duplex-transform.
//!
//! An eligibility predicate decides, per unit, whether a transformer acts on
//! the unit or passes it through untouched. Predicates inspect identifying
//! metadata only (never content), are deterministic, and are total: they
//! return an answer for every well-formed unit and never fail.

use transform_types::Unit;

/// The standard eligibility predicate: matches a unit's path extension
/// against a configured set.
///
/// Matching is case-insensitive (`Main.JS` matches a filter for `js`).
/// Units whose path has no extension never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    /// Lowercased extensions this filter accepts.
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Create a filter matching a single extension.
    pub fn new(extension: &str) -> Self {
        Self {
            extensions: vec![normalize(extension)],
        }
    }

    /// Create a filter matching any of the given extensions.
    pub fn any_of(extensions: &[&str]) -> Self {
        Self {
            extensions: extensions.iter().map(|e| normalize(e)).collect(),
        }
    }

    /// Check whether the unit's extension matches this filter.
    pub fn matches(&self, unit: &Unit) -> bool {
        match unit.extension() {
            Some(ext) => self.extensions.iter().any(|e| *e == ext),
            None => false,
        }
    }

    /// The extensions this filter accepts (lowercased, without dots).
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

/// Lowercase and strip a leading dot, so `".js"` and `"JS"` both mean `js`.
fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}
