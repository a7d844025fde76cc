//! The unit payload and its identifying metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identifying path of a unit.
///
/// Forward-slash separated, relative to the sync root. A unit's path is its
/// identity: it is stable across a transform unless the transformer
/// explicitly renames it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitPath(String);

impl UnitPath {
    /// Create a UnitPath from a string.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The file name component (everything after the last `/`).
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// The extension (everything after the last `.` of the file name).
    ///
    /// Returns `None` for names without a dot, or with nothing after it.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }
}

impl fmt::Display for UnitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for UnitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitPath({})", self.0)
    }
}

impl From<&str> for UnitPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Which side of the sync boundary a unit currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitOrigin {
    /// Read from the local filesystem.
    Filesystem,
    /// Fetched from the server-side tree.
    Server,
}

/// Content encoding hint passed by the pipeline host per operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Encoding {
    /// UTF-8 text content.
    #[default]
    Utf8,
    /// Opaque binary content.
    Binary,
    /// A host-specific encoding label the core does not interpret.
    Other(String),
}

/// One logical file/node flowing through the pipeline.
///
/// A unit is an opaque payload with an identifying path, a content buffer,
/// and an origin tag. A single logical entity may be round-tripped between
/// the filesystem and server representations.
///
/// Units are created by the pipeline host when reading from source, passed
/// through zero or more transformers, and terminated when suppressed or when
/// they reach the sink. Transform operations take `&Unit` and produce a new
/// unit via [`Unit::replacing_content`], so the input is never mutated.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// The identifying path.
    pub path: UnitPath,
    /// The content buffer.
    pub content: Vec<u8>,
    /// Which representation this unit currently is.
    pub origin: UnitOrigin,
}

impl Unit {
    /// Create a new unit.
    pub fn new(path: impl Into<UnitPath>, content: Vec<u8>, origin: UnitOrigin) -> Self {
        Self {
            path: path.into(),
            content,
            origin,
        }
    }

    /// A copy of this unit with the content replaced and the origin flipped
    /// to the given side.
    ///
    /// This is the clone-then-replace discipline: transformers build their
    /// output from the input without touching the input.
    pub fn replacing_content(&self, content: Vec<u8>, origin: UnitOrigin) -> Self {
        Self {
            path: self.path.clone(),
            content,
            origin,
        }
    }

    /// The unit's content interpreted as UTF-8, if it is valid UTF-8.
    pub fn content_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }

    /// The extension of the unit's path, lowercased for comparison.
    pub fn extension(&self) -> Option<String> {
        self.path.extension().map(|e| e.to_ascii_lowercase())
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("path", &self.path)
            .field("content", &format!("[{} bytes]", self.content.len()))
            .field("origin", &self.origin)
            .finish()
    }
}
