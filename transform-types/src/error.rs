//! Error types for duplex-transform.

use thiserror::Error;

/// Errors that can occur in a transform operation.
///
/// Ineligible units are not errors (they pass through), and suppression of
/// an irreversible writeback is not an error (it is policy). Everything here
/// is surfaced to the pipeline host through the operation's `Result`; the
/// host decides whether to halt or skip.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The external compilation step rejected the input
    /// (syntax error, unsupported construct).
    #[error("transpilation failed for {path}: {message}")]
    Transpile {
        /// Path of the unit that failed.
        path: String,
        /// Compiler diagnostic.
        message: String,
    },

    /// The configured preset set is invalid or unsupported by the runtime.
    #[error("unsupported preset: {0}")]
    UnsupportedPreset(String),

    /// The unit's content does not match the host's encoding hint.
    #[error("content of {path} is not valid for encoding {encoding}")]
    InvalidEncoding {
        /// Path of the offending unit.
        path: String,
        /// The encoding hint the host passed.
        encoding: String,
    },

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}
