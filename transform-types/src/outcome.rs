//! Transform direction and completion value.

use crate::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction a unit is travelling through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Forward: filesystem representation toward the server.
    ToServer,
    /// Reverse: server representation toward the filesystem.
    ToFilesystem,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToServer => write!(f, "to-server"),
            Direction::ToFilesystem => write!(f, "to-filesystem"),
        }
    }
}

/// The completion value of one transform operation.
///
/// An operation completes exactly once with either one resulting unit, an
/// explicit empty result (the unit is dropped from this direction), or an
/// error carried in the surrounding `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// One resulting unit, delivered to the next pipeline stage.
    Emit(Unit),
    /// No output: propagation is intentionally suppressed.
    ///
    /// One-way transforms return this in their inverse direction so lossy
    /// regenerations never overwrite the authoritative source.
    Suppress,
}

impl Outcome {
    /// Check whether this outcome suppresses propagation.
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Outcome::Suppress)
    }

    /// The emitted unit, if any.
    pub fn unit(&self) -> Option<&Unit> {
        match self {
            Outcome::Emit(unit) => Some(unit),
            Outcome::Suppress => None,
        }
    }

    /// Consume the outcome, returning the emitted unit if any.
    pub fn into_unit(self) -> Option<Unit> {
        match self {
            Outcome::Emit(unit) => Some(unit),
            Outcome::Suppress => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnitOrigin;

    #[test]
    fn direction_display() {
        assert_eq!(Direction::ToServer.to_string(), "to-server");
        assert_eq!(Direction::ToFilesystem.to_string(), "to-filesystem");
    }

    #[test]
    fn emit_carries_unit() {
        let unit = Unit::new("a.js", vec![1], UnitOrigin::Filesystem);
        let outcome = Outcome::Emit(unit.clone());

        assert!(!outcome.is_suppressed());
        assert_eq!(outcome.unit(), Some(&unit));
        assert_eq!(outcome.into_unit(), Some(unit));
    }

    #[test]
    fn suppress_carries_nothing() {
        let outcome = Outcome::Suppress;

        assert!(outcome.is_suppressed());
        assert!(outcome.unit().is_none());
        assert!(outcome.into_unit().is_none());
    }
}
