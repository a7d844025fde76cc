//! # transform-types
//!
//! Foundational types for the duplex-transform bidirectional pipeline.
//!
//! This crate provides the types shared across all duplex-transform crates:
//! - [`Unit`], [`UnitPath`], [`UnitOrigin`] - The payload flowing through the pipeline
//! - [`Encoding`] - Per-operation content encoding hint
//! - [`Direction`], [`Outcome`] - Transform direction and completion value
//! - [`RunId`] - Sync run identity for log correlation
//! - [`TransformError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ids;
mod outcome;
mod unit;

pub use error::TransformError;
pub use ids::RunId;
pub use outcome::{Direction, Outcome};
pub use unit::{Encoding, Unit, UnitOrigin, UnitPath};
