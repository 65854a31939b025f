//! Core types for the junklet fixture generator.
//!
//! This crate provides the foundational types shared by the generator and the
//! facade crate:
//!
//! - [`JunkValue`] - Dynamic value produced, compared and formatted by the generator
//! - [`ValueKind`] - Payload-free discriminant of a `JunkValue`
//! - [`JunkSchema`] - Named generator definitions loaded from YAML
//!
//! # Architecture
//!
//! ```text
//! junk-core (this crate)
//!    │
//!    └─── junk-generator  (engine, registry, formatters)
//!            │
//!            └─── junklet (bindings, schema-driven engine setup)
//! ```

pub mod schema;
pub mod values;

// Re-exports for convenience
pub use schema::{FormatConfig, GeneratorConfig, GeneratorDefinition, JunkSchema, SchemaError};
pub use values::{JunkValue, ValueKind};
