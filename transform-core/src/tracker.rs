//! Per-run disposition tracking.
//!
//! This module tracks what happened to each unit over one sync run:
//! - Which units passed through untouched
//! - Which were transformed, and in which direction
//! - Which were suppressed (one-way transforms) or failed
//!
//! The pipeline records dispositions as it processes units; the host reads
//! the stats afterwards to report what a run did.

use std::collections::BTreeMap;
use transform_types::{Direction, UnitPath};

/// What the pipeline did with one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// No eligible transformer; the unit passed through unchanged.
    PassedThrough,
    /// A transformer emitted a replacement.
    Transformed(Direction),
    /// Propagation was suppressed (one-way transform, inverse direction).
    Suppressed(Direction),
    /// A transform operation returned an error; the unit was abandoned
    /// for this run.
    Failed(Direction),
}

/// Aggregate counts for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Units that passed through unchanged.
    pub passed_through: usize,
    /// Units replaced by a transformer.
    pub transformed: usize,
    /// Units dropped by suppression.
    pub suppressed: usize,
    /// Units abandoned after a transform failure.
    pub failed: usize,
}

/// Tracks unit dispositions over one sync run.
///
/// Recording is keyed by path; recording a new disposition for a path the
/// run has already seen overwrites the previous one (the last stage to touch
/// a unit decides its fate). Paths iterate in sorted order.
#[derive(Debug, Clone, Default)]
pub struct RunTracker {
    dispositions: BTreeMap<UnitPath, Disposition>,
}

impl RunTracker {
    /// Create a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the disposition of one unit.
    pub fn record(&mut self, path: UnitPath, disposition: Disposition) {
        self.dispositions.insert(path, disposition);
    }

    /// The disposition recorded for a path, if any.
    pub fn disposition(&self, path: &UnitPath) -> Option<Disposition> {
        self.dispositions.get(path).copied()
    }

    /// Number of units this run has seen.
    pub fn len(&self) -> usize {
        self.dispositions.len()
    }

    /// Check if the run has seen no units.
    pub fn is_empty(&self) -> bool {
        self.dispositions.is_empty()
    }

    /// Paths whose propagation was suppressed, in sorted order.
    pub fn suppressed_paths(&self) -> Vec<&UnitPath> {
        self.dispositions
            .iter()
            .filter(|(_, d)| matches!(d, Disposition::Suppressed(_)))
            .map(|(p, _)| p)
            .collect()
    }

    /// Aggregate counts for the run.
    pub fn stats(&self) -> RunStats {
        let mut stats = RunStats::default();
        for disposition in self.dispositions.values() {
            match disposition {
                Disposition::PassedThrough => stats.passed_through += 1,
                Disposition::Transformed(_) => stats.transformed += 1,
                Disposition::Suppressed(_) => stats.suppressed += 1,
                Disposition::Failed(_) => stats.failed += 1,
            }
        }
        stats
    }

    /// Clear all recorded dispositions.
    pub fn clear(&mut self) {
        self.dispositions.clear();
    }
}
