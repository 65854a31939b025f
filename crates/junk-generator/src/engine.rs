//! The junk engine: dispatch, exclusion retry loop, formatting.

use crate::dispatch::TypeDispatcher;
use crate::error::JunkError;
use crate::exclude::Excluder;
use crate::format::Formattable;
use crate::random::{OsRandom, RandomSource, SeededRandom};
use crate::registry::GeneratorRegistry;
use crate::request::{GenerationRequest, JunkType};
use junk_core::JunkValue;
use std::sync::Arc;

/// Maximum nesting of named generators before generation is aborted.
pub const MAX_NAMED_DEPTH: usize = 32;

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for deterministic generation. `None` uses OS randomness.
    pub seed: Option<u64>,

    /// Number of excluded candidates tolerated per `generate` call.
    ///
    /// `None` retries forever, which never terminates if the exclusion
    /// covers the whole candidate domain.
    pub max_retries: Option<u64>,
}

impl EngineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Set the retry ceiling.
    pub fn with_max_retries(mut self, max_retries: u64) -> Self {
        self.max_retries = Some(max_retries);
        self
    }
}

/// Single entry point for producing junk.
///
/// The engine is cheap to share: wrap it in an `Arc` and call
/// [`generate`](Self::generate) from any thread.
pub struct JunkEngine {
    rng: Arc<dyn RandomSource>,
    registry: Arc<GeneratorRegistry>,
    max_retries: Option<u64>,
}

impl Default for JunkEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JunkEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JunkEngine")
            .field("rng", &self.rng.source_id())
            .field("registry", &self.registry)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl JunkEngine {
    /// Create an engine with OS randomness, an empty registry and no retry ceiling.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine from a configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        let rng: Arc<dyn RandomSource> = match config.seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(OsRandom),
        };
        Self {
            rng,
            registry: Arc::new(GeneratorRegistry::new()),
            max_retries: config.max_retries,
        }
    }

    /// Replace the random source.
    pub fn with_rng(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Share an existing registry.
    pub fn with_registry(mut self, registry: Arc<GeneratorRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Set or clear the retry ceiling.
    pub fn with_max_retries(mut self, max_retries: Option<u64>) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// The registry consulted for named generators.
    pub fn registry(&self) -> &Arc<GeneratorRegistry> {
        &self.registry
    }

    /// The random source shared by every strategy.
    pub fn rng(&self) -> &Arc<dyn RandomSource> {
        &self.rng
    }

    /// Register a named generator.
    pub fn define_generator(
        &self,
        name: impl Into<String>,
        request: GenerationRequest,
    ) -> Result<(), JunkError> {
        self.registry.register(name, request)
    }

    /// Default junk: 32 lowercase hex characters.
    pub fn junk(&self) -> Result<JunkValue, JunkError> {
        self.generate(&GenerationRequest::default())
    }

    /// Produce a value for `request`.
    pub fn generate(&self, request: &GenerationRequest) -> Result<JunkValue, JunkError> {
        self.generate_at_depth(request, 0)
    }

    fn generate_at_depth(
        &self,
        request: &GenerationRequest,
        depth: usize,
    ) -> Result<JunkValue, JunkError> {
        if let JunkType::Named(name) = &request.junk_type {
            if depth >= MAX_NAMED_DEPTH {
                return Err(JunkError::RecursionLimit {
                    name: name.clone(),
                    limit: MAX_NAMED_DEPTH,
                });
            }
        }

        let strategy = TypeDispatcher::new(&self.registry).resolve(request)?;
        let excluder = Excluder::new(request.options.exclude.as_ref());
        let format = request.options.format.as_ref();
        let mut rejected = 0u64;

        loop {
            let raw = strategy.candidate(self.rng.as_ref(), |nested| {
                self.generate_at_depth(nested, depth + 1)
            })?;

            let (value, excluded) = match format {
                None => {
                    let excluded = excluder.rejects(&raw);
                    (raw, excluded)
                }
                Some(format) if excluder.may_inspect_formatted(&raw) => {
                    let formatted = format.format(raw.clone())?;
                    let excluded = if excluder.inspects_formatted(&raw, &formatted) {
                        excluder.rejects(&formatted)
                    } else {
                        excluder.rejects(&raw)
                    };
                    (formatted, excluded)
                }
                // Rejected candidates are never formatted
                Some(_) if excluder.rejects(&raw) => (raw, true),
                Some(format) => (format.format(raw)?, false),
            };

            if !excluded {
                return Ok(value);
            }

            rejected += 1;
            tracing::trace!(
                junk_type = request.junk_type.label(),
                rejected,
                "Excluded junk candidate"
            );
            if let Some(limit) = self.max_retries {
                if rejected >= limit {
                    tracing::warn!(
                        junk_type = request.junk_type.label(),
                        attempts = rejected,
                        "Giving up on junk generation, every candidate was excluded"
                    );
                    return Err(JunkError::ExhaustedCandidates { attempts: rejected });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclude::StepRange;
    use crate::format::{FormatSpec, JunkFormatter};
    use crate::request::JunkGenerator;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn seeded() -> JunkEngine {
        JunkEngine::with_config(EngineConfig::seeded(42))
    }

    struct SequenceGen {
        next: AtomicUsize,
    }

    impl JunkGenerator for SequenceGen {
        fn generate(&self, _rng: &dyn RandomSource) -> JunkValue {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            JunkValue::Int([1, 2, 3][n % 3])
        }
    }

    struct Doubler(i64);

    impl JunkFormatter for Doubler {
        fn new(input: JunkValue) -> Option<Self> {
            input.as_i64().map(Doubler)
        }

        fn format(&self) -> JunkValue {
            JunkValue::Int(self.0 * 2)
        }
    }

    #[test]
    fn test_default_junk_is_hex() {
        let value = JunkEngine::new().junk().unwrap();
        let s = value.as_str().unwrap();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_int_bounds() {
        let engine = seeded();
        let request = GenerationRequest::int().min(3).max(5);

        for _ in 0..200 {
            let v = engine.generate(&request).unwrap().as_i64().unwrap();
            assert!((3..5).contains(&v));
        }
    }

    #[test]
    fn test_exclusion_single_survivor() {
        let engine = seeded();
        let request = GenerationRequest::int().max(2).exclude_value(1);

        for _ in 0..50 {
            assert_eq!(engine.generate(&request).unwrap(), JunkValue::Int(0));
        }
    }

    #[test]
    fn test_exclusion_by_step_range() {
        let engine = seeded();
        let request = GenerationRequest::int().max(11).exclude_in(StepRange::new(1, 9, 2));

        for _ in 0..100 {
            let v = engine.generate(&request).unwrap().as_i64().unwrap();
            assert_eq!(v % 2, 0);
        }
    }

    #[test]
    fn test_bool_format_exclude_interaction() {
        let engine = seeded();

        let truth = engine
            .generate(
                &GenerationRequest::bool()
                    .format(FormatSpec::ToString)
                    .exclude_value("false"),
            )
            .unwrap();
        assert_eq!(truth, JunkValue::from("true"));

        let lies = engine
            .generate(
                &GenerationRequest::bool()
                    .format(FormatSpec::ToString)
                    .exclude_value(truth),
            )
            .unwrap();
        assert_eq!(lies, JunkValue::from("false"));
    }

    #[test]
    fn test_raw_exclusion_with_format() {
        let engine = seeded();
        let request = GenerationRequest::int()
            .max(2)
            .exclude_value(1)
            .format(FormatSpec::ToString);

        for _ in 0..50 {
            assert_eq!(engine.generate(&request).unwrap(), JunkValue::from("0"));
        }
    }

    #[test]
    fn test_template_format() {
        let engine = seeded();
        let request = GenerationRequest::callable(|| vec![2017, 1, 9])
            .format(FormatSpec::template("%d-%02d-%02d"));

        assert_eq!(engine.generate(&request).unwrap(), JunkValue::from("2017-01-09"));
    }

    #[test]
    fn test_stateful_generator() {
        let engine = seeded();
        let request = GenerationRequest::generator(SequenceGen {
            next: AtomicUsize::new(0),
        });

        let values: Vec<i64> = (0..4)
            .map(|_| engine.generate(&request).unwrap().as_i64().unwrap())
            .collect();
        assert_eq!(values, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_exclusion_retries_generator() {
        let engine = seeded();
        let request = GenerationRequest::generator(SequenceGen {
            next: AtomicUsize::new(0),
        })
        .exclude_values([1, 2]);

        assert_eq!(engine.generate(&request).unwrap(), JunkValue::Int(3));
    }

    #[test]
    fn test_named_generator() {
        let engine = seeded();
        engine
            .define_generator("pin", GenerationRequest::int().size(4))
            .unwrap();

        for _ in 0..50 {
            let v = engine
                .generate(&GenerationRequest::named("pin"))
                .unwrap()
                .as_i64()
                .unwrap();
            assert!((1000..10000).contains(&v));
        }
    }

    #[test]
    fn test_named_generator_with_outer_options() {
        let engine = seeded();
        engine
            .define_generator("digit", GenerationRequest::int().max(3))
            .unwrap();

        let request = GenerationRequest::named("digit")
            .exclude_values([0, 1])
            .format(FormatSpec::template("#%d"));
        assert_eq!(engine.generate(&request).unwrap(), JunkValue::from("#2"));
    }

    #[test]
    fn test_unknown_named_generator() {
        let engine = seeded();
        let result = engine.generate(&GenerationRequest::named("undefined_name"));
        assert!(matches!(result, Err(JunkError::UnrecognizedType(name)) if name == "undefined_name"));
    }

    #[test]
    fn test_named_cycle_hits_recursion_limit() {
        let engine = seeded();
        engine.define_generator("ping", GenerationRequest::named("pong")).unwrap();
        engine.define_generator("pong", GenerationRequest::named("ping")).unwrap();

        let result = engine.generate(&GenerationRequest::named("ping"));
        assert!(matches!(
            result,
            Err(JunkError::RecursionLimit { limit: MAX_NAMED_DEPTH, .. })
        ));
    }

    #[test]
    fn test_retry_ceiling() {
        let engine = seeded().with_max_retries(Some(25));
        let request = GenerationRequest::bool().exclude_values([true, false]);

        let result = engine.generate(&request);
        assert!(matches!(result, Err(JunkError::ExhaustedCandidates { attempts: 25 })));
    }

    #[test]
    fn test_retry_ceiling_not_hit_for_satisfiable_exclusion() {
        let engine = seeded().with_max_retries(Some(1000));
        let request = GenerationRequest::bool().exclude_value(true);

        for _ in 0..20 {
            assert_eq!(engine.generate(&request).unwrap(), JunkValue::Bool(false));
        }
    }

    #[test]
    fn test_excluded_candidate_is_not_formatted() {
        let engine = JunkEngine::with_config(EngineConfig::seeded(1));
        let request = GenerationRequest::sample([JunkValue::Int(1), JunkValue::from("x")])
            .exclude_value("x")
            .format(FormatSpec::template("%d"));

        for _ in 0..50 {
            assert_eq!(engine.generate(&request).unwrap(), JunkValue::from("1"));
        }
    }

    #[test]
    fn test_predicate_exclusion_skips_formatting() {
        let engine = seeded();
        let request = GenerationRequest::sample([JunkValue::Int(7), JunkValue::Null])
            .exclude_if(JunkValue::is_null)
            .format(FormatSpec::delegate::<Doubler>());

        for _ in 0..50 {
            assert_eq!(engine.generate(&request).unwrap(), JunkValue::Int(14));
        }
    }

    #[test]
    fn test_format_error_propagates() {
        let engine = seeded();
        let request = GenerationRequest::bool().format(FormatSpec::template("%d"));

        assert!(matches!(engine.generate(&request), Err(JunkError::Format(_))));
    }

    #[test]
    fn test_seeded_engines_agree() {
        let a = seeded();
        let b = seeded();
        let request = GenerationRequest::hex().size(16);

        for _ in 0..10 {
            assert_eq!(a.generate(&request).unwrap(), b.generate(&request).unwrap());
        }
    }

    #[test]
    fn test_shared_registry() {
        let registry = Arc::new(GeneratorRegistry::new());
        registry.register("flag", GenerationRequest::bool()).unwrap();
        registry.seal();

        let engine = JunkEngine::new().with_registry(Arc::clone(&registry));
        assert!(engine.generate(&GenerationRequest::named("flag")).unwrap().as_bool().is_some());
        assert!(matches!(
            engine.define_generator("late", GenerationRequest::bool()),
            Err(JunkError::Sealed { .. })
        ));
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = Arc::new(seeded());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    engine
                        .generate(&GenerationRequest::int().max(10))
                        .unwrap()
                        .as_i64()
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert!((0..10).contains(&handle.join().unwrap()));
        }
    }
}
