//! Type dispatch: turning a request into a candidate strategy.
//!
//! Dispatch is a closed `match` over [`JunkType`]. Options are validated
//! here so that a strategy, once resolved, can only fail for named
//! generators whose nested generation fails.

use crate::error::JunkError;
use crate::generators::{generate_hex, generate_int, sample, IntConstraint, IntRange};
use crate::random::RandomSource;
use crate::registry::{GeneratorRegistry, RegisteredGenerator};
use crate::request::{GenerationRequest, JunkGenerator, JunkType, DEFAULT_HEX_SIZE};
use junk_core::JunkValue;
use std::sync::Arc;

/// Producer of raw candidates for one request.
pub enum Strategy<'a> {
    Hex(usize),
    Int(IntRange),
    Bool,
    Sample(&'a [JunkValue]),
    Call(&'a dyn JunkGenerator),
    Named(Arc<RegisteredGenerator>),
}

impl Strategy<'_> {
    /// Produce one candidate.
    ///
    /// `nested` runs the full pipeline for a named generator's request.
    pub fn candidate<F>(&self, rng: &dyn RandomSource, nested: F) -> Result<JunkValue, JunkError>
    where
        F: FnOnce(&GenerationRequest) -> Result<JunkValue, JunkError>,
    {
        match self {
            Self::Hex(size) => Ok(JunkValue::String(generate_hex(rng, *size))),
            Self::Int(range) => Ok(JunkValue::Int(generate_int(rng, *range))),
            Self::Bool => Ok(JunkValue::Bool(rng.coin())),
            Self::Sample(values) => sample(rng, values).ok_or_else(|| {
                JunkError::invalid_option("values", "collection", "collection is empty")
            }),
            Self::Call(generator) => Ok(generator.generate(rng)),
            Self::Named(registered) => nested(registered.request()),
        }
    }
}

/// Resolves requests against a registry.
#[derive(Debug, Clone, Copy)]
pub struct TypeDispatcher<'r> {
    registry: &'r GeneratorRegistry,
}

impl<'r> TypeDispatcher<'r> {
    pub fn new(registry: &'r GeneratorRegistry) -> Self {
        Self { registry }
    }

    /// Validate the request's options and pick its strategy.
    pub fn resolve<'a>(&self, request: &'a GenerationRequest) -> Result<Strategy<'a>, JunkError> {
        validate_options(request)?;
        let options = &request.options;

        let strategy = match &request.junk_type {
            JunkType::RawSize(size) => Strategy::Hex(*size),
            JunkType::Hex => Strategy::Hex(options.size.unwrap_or(DEFAULT_HEX_SIZE)),
            JunkType::Int => {
                let constraint = IntConstraint {
                    min: options.min,
                    max: options.max,
                    size: options.size,
                };
                Strategy::Int(constraint.resolve()?)
            }
            JunkType::Bool => Strategy::Bool,
            JunkType::Collection(values) => {
                if values.is_empty() {
                    return Err(JunkError::invalid_option(
                        "values",
                        "collection",
                        "collection is empty",
                    ));
                }
                Strategy::Sample(values)
            }
            JunkType::Callable(generator) => Strategy::Call(generator.as_ref()),
            JunkType::Named(name) => {
                let registered = self
                    .registry
                    .lookup(name)
                    .ok_or_else(|| JunkError::UnrecognizedType(name.clone()))?;
                Strategy::Named(registered)
            }
        };
        Ok(strategy)
    }
}

/// Reject options that do not apply to the request's type.
fn validate_options(request: &GenerationRequest) -> Result<(), JunkError> {
    let options = &request.options;
    let is_int = matches!(request.junk_type, JunkType::Int);
    let label = request.junk_type.label();

    if !is_int {
        if options.min.is_some() {
            return Err(JunkError::invalid_option("min", label, "only applies to int"));
        }
        if options.max.is_some() {
            return Err(JunkError::invalid_option("max", label, "only applies to int"));
        }
    }
    if options.size.is_some() && !matches!(request.junk_type, JunkType::Int | JunkType::Hex) {
        return Err(JunkError::invalid_option(
            "size",
            label,
            "only applies to int and hex",
        ));
    }
    Ok(())
}
