//! The external transpiler boundary.
//!
//! # Design
//!
//! The core treats the transpilation service as a pure, stateless function:
//! it takes raw source content plus a set of named presets and returns
//! compiled content or a failure. Implementations wrap whatever external
//! tool the host environment provides (a compiler process, an embedded
//! runtime); [`MockTranspiler`] scripts the boundary for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Transpiler errors.
#[derive(Debug, Error)]
pub enum TranspilerError {
    /// The input source was rejected (syntax error, unsupported construct).
    #[error("syntax error: {0}")]
    Syntax(String),

    /// A requested preset is not supported by the runtime.
    #[error("unsupported preset: {0}")]
    UnsupportedPreset(String),

    /// The transpilation service could not be reached or produced no output.
    #[error("transpiler unavailable: {0}")]
    Unavailable(String),
}

/// Contract for the external compilation service.
///
/// Implementations must be stateless per call: the same source and presets
/// always produce the same result or the same class of failure.
#[async_trait]
pub trait Transpiler: Send + Sync {
    /// Compile raw source content under the given named presets.
    async fn compile(&self, source: &str, presets: &[String])
        -> Result<String, TranspilerError>;
}

/// Mock transpiler for testing.
///
/// Allows queueing compiled outputs and capturing compile calls for
/// verification.
#[derive(Debug, Default)]
pub struct MockTranspiler {
    inner: Arc<Mutex<MockTranspilerInner>>,
}

#[derive(Debug, Default)]
struct MockTranspilerInner {
    outputs: VecDeque<String>,
    calls: Vec<(String, Vec<String>)>,
    fail_next: Option<TranspilerError>,
}

impl MockTranspiler {
    /// Create a new mock transpiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a compiled output for the next `compile()` call.
    pub fn queue_output(&self, compiled: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.outputs.push_back(compiled.to_string());
    }

    /// Get all (source, presets) pairs that were compiled.
    pub fn compile_calls(&self) -> Vec<(String, Vec<String>)> {
        let inner = self.inner.lock().unwrap();
        inner.calls.clone()
    }

    /// Get the most recently compiled source, if any.
    pub fn last_source(&self) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.calls.last().map(|(source, _)| source.clone())
    }

    /// Cause the next compile() to fail with the given error.
    pub fn fail_next_compile(&self, error: TranspilerError) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next = Some(error);
    }

    /// Clear all state (outputs, captured calls, forced failure).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockTranspilerInner::default();
    }
}

impl Clone for MockTranspiler {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Transpiler for MockTranspiler {
    async fn compile(
        &self,
        source: &str,
        presets: &[String],
    ) -> Result<String, TranspilerError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push((source.to_string(), presets.to_vec()));

        // Check for forced failure
        if let Some(error) = inner.fail_next.take() {
            return Err(error);
        }

        inner
            .outputs
            .pop_front()
            .ok_or_else(|| TranspilerError::Unavailable("no scripted output".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn mock_returns_queued_outputs_in_order() {
        let transpiler = MockTranspiler::new();
        transpiler.queue_output("compiled 1");
        transpiler.queue_output("compiled 2");

        let p = presets(&["es2015"]);
        let first = transpiler.compile("source 1", &p).await.unwrap();
        let second = transpiler.compile("source 2", &p).await.unwrap();

        assert_eq!(first, "compiled 1");
        assert_eq!(second, "compiled 2");
    }

    #[tokio::test]
    async fn mock_captures_calls() {
        let transpiler = MockTranspiler::new();
        transpiler.queue_output("out");

        transpiler
            .compile("let x = 1;", &presets(&["es2015"]))
            .await
            .unwrap();

        let calls = transpiler.compile_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "let x = 1;");
        assert_eq!(calls[0].1, vec!["es2015".to_string()]);
        assert_eq!(transpiler.last_source(), Some("let x = 1;".to_string()));
    }

    #[tokio::test]
    async fn mock_empty_queue_is_unavailable() {
        let transpiler = MockTranspiler::new();

        let result = transpiler.compile("source", &presets(&["es2015"])).await;
        assert!(matches!(result, Err(TranspilerError::Unavailable(_))));
    }

    #[tokio::test]
    async fn forced_failure_fires_once() {
        let transpiler = MockTranspiler::new();
        transpiler.queue_output("out");
        transpiler.fail_next_compile(TranspilerError::Syntax("unexpected token".into()));

        let p = presets(&["es2015"]);
        let failed = transpiler.compile("bad source", &p).await;
        assert!(matches!(failed, Err(TranspilerError::Syntax(_))));

        // Next compile should work (and get the queued output)
        let ok = transpiler.compile("good source", &p).await.unwrap();
        assert_eq!(ok, "out");
    }

    #[tokio::test]
    async fn mock_clone_shares_state() {
        let t1 = MockTranspiler::new();
        let t2 = t1.clone();

        t1.queue_output("out");
        t2.compile("source", &presets(&["es2015"])).await.unwrap();

        assert_eq!(t1.compile_calls().len(), 1);
    }

    #[tokio::test]
    async fn reset_clears_all() {
        let transpiler = MockTranspiler::new();
        transpiler.queue_output("out");
        transpiler
            .compile("source", &presets(&["es2015"]))
            .await
            .unwrap();

        transpiler.reset();

        assert!(transpiler.compile_calls().is_empty());
        assert!(transpiler.last_source().is_none());
    }
}
