//! Junk value generation engine for the junklet fixture generator.
//!
//! This crate provides the [`JunkEngine`], which turns a [`GenerationRequest`]
//! into a [`JunkValue`]: random hex, bounded integers, booleans, samples from
//! a collection, values from user generators, or values from generators
//! registered by name.
//!
//! # Architecture
//!
//! ```text
//! GenerationRequest { junk_type, options }
//!        │
//!        ▼
//! ┌──────────────────┐      ┌───────────────────┐
//! │  TypeDispatcher  │─────▶│ GeneratorRegistry │
//! └────────┬─────────┘      └───────────────────┘
//!          │ Strategy
//!          ▼
//! ┌──────────────────┐
//! │    JunkEngine    │  candidate ─▶ format ─▶ exclude ─▶ retry
//! └────────┬─────────┘
//!          │
//!          ▼
//!      JunkValue
//! ```
//!
//! # Example
//!
//! ```rust
//! use junk_generator::{EngineConfig, FormatSpec, GenerationRequest, JunkEngine};
//!
//! let engine = JunkEngine::with_config(EngineConfig::seeded(42));
//! engine
//!     .define_generator("member_id", GenerationRequest::int().size(6))
//!     .unwrap();
//!
//! let id = engine.generate(&GenerationRequest::named("member_id")).unwrap();
//! assert_eq!(id.to_string().len(), 6);
//!
//! let flag = engine
//!     .generate(
//!         &GenerationRequest::bool()
//!             .format(FormatSpec::ToString)
//!             .exclude_value("false"),
//!     )
//!     .unwrap();
//! assert_eq!(flag.as_str(), Some("true"));
//! ```
//!
//! # Junk types
//!
//! - `hex` - Lowercase hex string, 32 characters unless `size` is given
//! - `int` - Integer in `[min, max)`, optionally with exactly `size` digits
//! - `bool` - `true` or `false`
//! - `collection` - Uniform sample from a list of values
//! - `callable` - Value returned by a [`JunkGenerator`]
//! - `named` - Generator registered under a name

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod exclude;
pub mod format;
pub mod generators;
pub mod random;
pub mod registry;
pub mod request;

// Re-exports for convenience
pub use engine::{EngineConfig, JunkEngine, MAX_NAMED_DEPTH};
pub use error::JunkError;
pub use exclude::{Excluder, Exclusion, Membership, StepRange};
pub use format::{FormatSpec, Formattable, JunkFormatter};
pub use junk_core::{JunkValue, ValueKind};
pub use random::{OsRandom, RandomSource, SeededRandom};
pub use registry::{GeneratorRegistry, RegisteredGenerator};
pub use request::{GenerationRequest, JunkGenerator, JunkOptions, JunkType, DEFAULT_HEX_SIZE};
