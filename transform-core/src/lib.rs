//! # transform-core
//!
//! Pure logic for duplex-transform (no I/O, instant tests).
//!
//! This crate implements the eligibility predicates, the per-unit lifecycle
//! state machine, and the per-run disposition tracker without any async or
//! filesystem I/O.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about state transitions
//!
//! The actual transform operations (which may call an external transpiler)
//! live in `transform-pipeline`, which consults these modules.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod eligibility;
pub mod state;
pub mod tracker;

pub use eligibility::ExtensionFilter;
pub use state::{UnitEvent, UnitState};
pub use tracker::{Disposition, RunStats, RunTracker};
