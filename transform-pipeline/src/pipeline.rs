//! The ordered transformer chain a sync run drives units through.
//!
//! # Design
//!
//! A [`Pipeline`] is built once per sync run from an ordered list of
//! registered transformers; the list is fixed after
//! [`PipelineBuilder::build`]. Toward the server, transformers apply in
//! registration order; toward the filesystem, the order is mirrored so the
//! last transformer to touch a unit on the way out is the first to see it on
//! the way back.
//!
//! One call processes one unit in one direction. A stage that is not
//! eligible for the unit is skipped; an eligible stage either emits a
//! replacement (fed to the next stage), suppresses (the unit is dropped from
//! this direction and the run for it ends), or fails (the error propagates
//! to the host, which decides whether to halt or skip). Per-unit
//! dispositions are recorded in a [`RunTracker`] the host can read after
//! the run.

use std::sync::Arc;
use tokio::sync::Mutex;
use transform_core::{Disposition, RunStats, RunTracker, UnitEvent, UnitState};
use transform_types::{Direction, Encoding, Outcome, RunId, TransformError, Unit, UnitPath};

use crate::transformer::Transformer;

/// Builder for [`Pipeline`]; registration order is application order in the
/// to-server direction.
#[derive(Default)]
pub struct PipelineBuilder {
    transformers: Vec<Arc<dyn Transformer>>,
}

impl PipelineBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transformer at the end of the chain.
    pub fn register(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformers.push(Arc::new(transformer));
        self
    }

    /// Register an already-shared transformer at the end of the chain.
    pub fn register_shared(mut self, transformer: Arc<dyn Transformer>) -> Self {
        self.transformers.push(transformer);
        self
    }

    /// Freeze the chain and create the pipeline for one sync run.
    pub fn build(self) -> Pipeline {
        Pipeline {
            run_id: RunId::new(),
            transformers: self.transformers,
            tracker: Arc::new(Mutex::new(RunTracker::new())),
        }
    }
}

/// The ordered, immutable transformer chain for one sync run.
pub struct Pipeline {
    run_id: RunId,
    transformers: Vec<Arc<dyn Transformer>>,
    tracker: Arc<Mutex<RunTracker>>,
}

impl Pipeline {
    /// Start building a pipeline.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// The id of this sync run.
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Number of registered transformers.
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    /// Check whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Push one unit through the chain toward the server.
    ///
    /// Returns the resulting unit, or `None` if a stage suppressed it.
    pub async fn run_to_server(
        &self,
        unit: Unit,
        encoding: Encoding,
    ) -> Result<Option<Unit>, TransformError> {
        self.run(unit, encoding, Direction::ToServer).await
    }

    /// Pull one unit through the chain toward the filesystem.
    ///
    /// Returns the resulting unit, or `None` if a stage suppressed it.
    pub async fn run_to_filesystem(
        &self,
        unit: Unit,
        encoding: Encoding,
    ) -> Result<Option<Unit>, TransformError> {
        self.run(unit, encoding, Direction::ToFilesystem).await
    }

    /// Aggregate counts for the run so far.
    pub async fn stats(&self) -> RunStats {
        self.tracker.lock().await.stats()
    }

    /// Paths whose propagation was suppressed in this run, sorted.
    pub async fn suppressed_paths(&self) -> Vec<UnitPath> {
        self.tracker
            .lock()
            .await
            .suppressed_paths()
            .into_iter()
            .cloned()
            .collect()
    }

    async fn run(
        &self,
        unit: Unit,
        encoding: Encoding,
        direction: Direction,
    ) -> Result<Option<Unit>, TransformError> {
        // The unit's identity for tracking purposes, even if a stage renames it.
        let identity = unit.path.clone();
        let mut current = unit;
        let mut state = UnitState::new();

        let stages: Vec<&Arc<dyn Transformer>> = match direction {
            Direction::ToServer => self.transformers.iter().collect(),
            Direction::ToFilesystem => self.transformers.iter().rev().collect(),
        };

        for (index, transformer) in stages.into_iter().enumerate() {
            if !transformer.is_eligible(&current) {
                tracing::debug!(
                    "run {}: stage {} ineligible for {} ({})",
                    self.run_id,
                    index,
                    identity,
                    direction
                );
                state = state.on_event(UnitEvent::PassedThrough);
                continue;
            }

            let result = match direction {
                Direction::ToServer => transformer.to_server(&current, encoding.clone()).await,
                Direction::ToFilesystem => {
                    transformer.to_filesystem(&current, encoding.clone()).await
                }
            };

            match result {
                Ok(Outcome::Emit(next)) => {
                    tracing::debug!(
                        "run {}: stage {} emitted {} ({})",
                        self.run_id,
                        index,
                        next.path,
                        direction
                    );
                    state = state.on_event(UnitEvent::Emitted { direction });
                    current = next;
                }
                Ok(Outcome::Suppress) => {
                    tracing::debug!(
                        "run {}: stage {} suppressed {} ({})",
                        self.run_id,
                        index,
                        identity,
                        direction
                    );
                    self.record(identity, Disposition::Suppressed(direction)).await;
                    return Ok(None);
                }
                Err(error) => {
                    tracing::warn!(
                        "run {}: stage {} failed for {} ({}): {}",
                        self.run_id,
                        index,
                        identity,
                        direction,
                        error
                    );
                    self.record(identity, Disposition::Failed(direction)).await;
                    return Err(error);
                }
            }
        }

        let disposition = if state.is_untransformed() {
            Disposition::PassedThrough
        } else {
            Disposition::Transformed(direction)
        };
        self.record(identity, disposition).await;

        Ok(Some(current))
    }

    async fn record(&self, path: UnitPath, disposition: Disposition) {
        self.tracker.lock().await.record(path, disposition);
    }
}
