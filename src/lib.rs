//! Junklet
//!
//! Random junk values for test fixtures: hex strings, bounded integers,
//! booleans, samples from a collection and values from user generators,
//! with exclusion by retry and optional formatting.
//!
//! # Crates
//!
//! - `junk_core` - value model and YAML schema
//! - `junk_generator` - engine, named generator registry, formatters
//!
//! # Configuration
//!
//! Named generators can be declared in YAML and loaded into a sealed engine:
//!
//! ```rust
//! use junklet::{engine_from_schema, GenerationRequest, JunkSchema};
//!
//! let schema = JunkSchema::from_yaml(r#"
//! version: 1
//! seed: 42
//! generators:
//!   - name: member_id
//!     type: int
//!     size: 6
//!   - name: state
//!     type: one_of
//!     values: [CA, NY, TX]
//!     exclude: TX
//! "#).unwrap();
//!
//! let engine = engine_from_schema(&schema).unwrap();
//! let state = engine.generate(&GenerationRequest::named("state")).unwrap();
//! assert_ne!(state.as_str(), Some("TX"));
//! ```

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

pub mod bindings;

pub use bindings::{junk_let, junklet, let_junk, BindingSink, Thunk, DEFAULT_SEPARATOR};
pub use junk_core::{FormatConfig, GeneratorConfig, GeneratorDefinition, JunkSchema, SchemaError};
pub use junk_generator::{
    EngineConfig, Exclusion, FormatSpec, Formattable, GenerationRequest, GeneratorRegistry,
    JunkEngine, JunkError, JunkFormatter, JunkGenerator, JunkType, JunkValue, Membership,
    RandomSource, StepRange, ValueKind,
};

/// Build an engine from a schema.
///
/// The schema's seed and retry ceiling configure the engine; every generator
/// it defines is registered and the registry is sealed.
pub fn engine_from_schema(schema: &JunkSchema) -> Result<JunkEngine, JunkError> {
    let config = EngineConfig {
        seed: schema.seed,
        max_retries: schema.max_retries,
    };
    let registry = Arc::new(GeneratorRegistry::new());
    registry.register_schema(schema)?;
    registry.seal();

    tracing::info!(
        generators = registry.len(),
        seeded = schema.seed.is_some(),
        "Loaded junk schema"
    );
    Ok(JunkEngine::with_config(config).with_registry(registry))
}

/// Load a schema file and build an engine from it.
pub fn engine_from_file(path: impl AsRef<Path>) -> anyhow::Result<JunkEngine> {
    let path = path.as_ref();
    let schema = JunkSchema::from_file(path)
        .with_context(|| format!("Failed to load junk schema from {}", path.display()))?;
    engine_from_schema(&schema)
        .with_context(|| format!("Failed to build junk engine from {}", path.display()))
}
