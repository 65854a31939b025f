//! Generation requests.
//!
//! A [`GenerationRequest`] pairs exactly one [`JunkType`] with the options
//! that refine it. Requests are built through explicit constructors:
//!
//! ```rust
//! use junk_generator::{GenerationRequest, FormatSpec};
//!
//! let pin = GenerationRequest::int().size(4);
//! let flag = GenerationRequest::bool().format(FormatSpec::ToString).exclude_value("false");
//! let id = GenerationRequest::named("member_id");
//! ```

use crate::exclude::{Exclusion, Membership};
use crate::format::FormatSpec;
use crate::random::RandomSource;
use junk_core::{FormatConfig, GeneratorConfig, GeneratorDefinition, JunkValue};
use std::fmt;
use std::sync::Arc;

/// Number of hex characters produced when no size is given.
pub const DEFAULT_HEX_SIZE: usize = 32;

/// A user-supplied generator invoked for every candidate.
pub trait JunkGenerator: Send + Sync {
    /// Produce the next candidate.
    fn generate(&self, rng: &dyn RandomSource) -> JunkValue;
}

/// Adapts a zero-argument closure into a [`JunkGenerator`].
pub struct FnGenerator<F>(F);

impl<F, T> JunkGenerator for FnGenerator<F>
where
    F: Fn() -> T + Send + Sync,
    T: Into<JunkValue>,
{
    fn generate(&self, _rng: &dyn RandomSource) -> JunkValue {
        (self.0)().into()
    }
}

/// The kind of junk to produce.
#[derive(Clone)]
pub enum JunkType {
    /// Hex string of exactly `n` characters
    RawSize(usize),
    /// Hex string sized by the `size` option (default 32)
    Hex,
    /// Integer bounded by `min`/`max`/`size`
    Int,
    /// `true` or `false`
    Bool,
    /// Element sampled from a materialized collection
    Collection(Vec<JunkValue>),
    /// Value produced by a user generator
    Callable(Arc<dyn JunkGenerator>),
    /// Registered generator looked up by name
    Named(String),
}

impl JunkType {
    /// Short name used in diagnostics.
    pub fn label(&self) -> &str {
        match self {
            Self::RawSize(_) => "raw_size",
            Self::Hex => "hex",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Collection(_) => "collection",
            Self::Callable(_) => "callable",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Debug for JunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RawSize(n) => f.debug_tuple("RawSize").field(n).finish(),
            Self::Hex => f.write_str("Hex"),
            Self::Int => f.write_str("Int"),
            Self::Bool => f.write_str("Bool"),
            Self::Collection(values) => f.debug_tuple("Collection").field(values).finish(),
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// Options refining a request. Which options apply depends on the type.
#[derive(Clone, Debug, Default)]
pub struct JunkOptions {
    /// Lower integer bound (inclusive), `Int` only
    pub min: Option<i64>,
    /// Upper integer bound (exclusive), `Int` only
    pub max: Option<i64>,
    /// Digit count for `Int`, character count for `Hex`
    pub size: Option<usize>,
    /// Candidates to reject
    pub exclude: Option<Exclusion>,
    /// Transformation applied to accepted candidates
    pub format: Option<FormatSpec>,
}

/// A complete request: one type plus its options.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub junk_type: JunkType,
    pub options: JunkOptions,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::hex()
    }
}

impl GenerationRequest {
    /// Create a request for the given type with no options.
    pub fn new(junk_type: JunkType) -> Self {
        Self {
            junk_type,
            options: JunkOptions::default(),
        }
    }

    /// Hex string of exactly `size` characters.
    pub fn raw_size(size: usize) -> Self {
        Self::new(JunkType::RawSize(size))
    }

    /// Hex string, 32 characters unless `size` is set.
    pub fn hex() -> Self {
        Self::new(JunkType::Hex)
    }

    /// Random integer.
    pub fn int() -> Self {
        Self::new(JunkType::Int)
    }

    /// Random boolean.
    pub fn bool() -> Self {
        Self::new(JunkType::Bool)
    }

    /// Random element of `values`.
    pub fn sample<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<JunkValue>,
    {
        Self::new(JunkType::Collection(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    /// Value returned by a closure.
    pub fn callable<F, T>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<JunkValue>,
    {
        Self::new(JunkType::Callable(Arc::new(FnGenerator(f))))
    }

    /// Value returned by a generator object.
    pub fn generator(generator: impl JunkGenerator + 'static) -> Self {
        Self::new(JunkType::Callable(Arc::new(generator)))
    }

    /// Value produced by the generator registered under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(JunkType::Named(name.into()))
    }

    /// Set the inclusive lower bound.
    pub fn min(mut self, min: i64) -> Self {
        self.options.min = Some(min);
        self
    }

    /// Set the exclusive upper bound.
    pub fn max(mut self, max: i64) -> Self {
        self.options.max = Some(max);
        self
    }

    /// Set the digit count (`Int`) or character count (`Hex`).
    pub fn size(mut self, size: usize) -> Self {
        self.options.size = Some(size);
        self
    }

    /// Set the exclusion.
    pub fn exclude(mut self, exclusion: Exclusion) -> Self {
        self.options.exclude = Some(exclusion);
        self
    }

    /// Exclude a single value.
    pub fn exclude_value(self, value: impl Into<JunkValue>) -> Self {
        self.exclude(Exclusion::value(value))
    }

    /// Exclude every value in the list.
    pub fn exclude_values<I, T>(self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<JunkValue>,
    {
        self.exclude(Exclusion::values(values))
    }

    /// Exclude candidates for which `predicate` returns true.
    pub fn exclude_if<F>(self, predicate: F) -> Self
    where
        F: Fn(&JunkValue) -> bool + Send + Sync + 'static,
    {
        self.exclude(Exclusion::predicate(predicate))
    }

    /// Exclude candidates contained in `collection`.
    pub fn exclude_in(self, collection: impl Membership + 'static) -> Self {
        self.exclude(Exclusion::membership(collection))
    }

    /// Set the output format.
    pub fn format(mut self, format: FormatSpec) -> Self {
        self.options.format = Some(format);
        self
    }
}

impl From<&GeneratorDefinition> for GenerationRequest {
    fn from(definition: &GeneratorDefinition) -> Self {
        let mut request = match &definition.generator {
            GeneratorConfig::Hex { size } => {
                let mut request = Self::hex();
                request.options.size = *size;
                request
            }
            GeneratorConfig::Int { min, max, size } => {
                let mut request = Self::int();
                request.options.min = *min;
                request.options.max = *max;
                request.options.size = size.map(|s| s as usize);
                request
            }
            GeneratorConfig::Bool => Self::bool(),
            GeneratorConfig::OneOf { values } => {
                Self::new(JunkType::Collection(values.iter().map(JunkValue::from_yaml).collect()))
            }
            GeneratorConfig::Named { generator } => Self::named(generator.clone()),
        };

        let mut excluded = definition.excluded_values();
        request.options.exclude = match excluded.len() {
            0 => None,
            1 => excluded.pop().map(Exclusion::Value),
            _ => Some(Exclusion::Values(excluded)),
        };

        request.options.format = definition.format.as_ref().map(|format| match format {
            FormatConfig::String => FormatSpec::ToString,
            FormatConfig::Int => FormatSpec::ToInt,
            FormatConfig::Template(template) => FormatSpec::Template(template.clone()),
        });

        request
    }
}
