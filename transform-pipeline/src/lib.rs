//! # transform-pipeline
//!
//! Bidirectional transformer chain for duplex-transform sync runs.
//!
//! This is the layer a pipeline host drives. It provides:
//!
//! - **Transformer trait**: the bidirectional plugin contract
//! - **Partial decorator**: composes an eligibility predicate with any
//!   transformer, passing ineligible units through unchanged
//! - **Pipeline**: threads one unit through the ordered chain of registered
//!   transformers, in registration order toward the server and mirrored
//!   order toward the filesystem
//! - **Transpiler boundary**: the external compilation service contract,
//!   with a scriptable mock for tests
//! - **ScriptTransformer**: a concrete one-way plugin compiling ES2015+
//!   sources to ES5 through the transpiler boundary
//!
//! ## Architecture
//!
//! ```text
//! Pipeline host → Pipeline → Transformer → Transpiler (external)
//!                     ↓
//!              transform-core (pure state machine + run tracking)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use duplex_transform_pipeline::{Pipeline, ScriptTransformer, MockTranspiler};
//! use transform_types::{Encoding, Unit, UnitOrigin};
//!
//! let pipeline = Pipeline::builder()
//!     .register(ScriptTransformer::new(MockTranspiler::new()))
//!     .build();
//!
//! let unit = Unit::new("src/Main.js", source, UnitOrigin::Filesystem);
//! let pushed = pipeline.run_to_server(unit, Encoding::Utf8).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pipeline;
pub mod script;
pub mod transformer;
pub mod transpiler;

pub use pipeline::{Pipeline, PipelineBuilder};
pub use script::{ScriptConfig, ScriptTransformer};
pub use transformer::{Partial, Transformer};
pub use transpiler::{MockTranspiler, Transpiler, TranspilerError};
