//! Binding helpers.
//!
//! A test framework owns the memoized bindings; this module only hands it
//! thunks through [`BindingSink`]. Each thunk runs the engine when the
//! binding is first resolved, and the sink decides how long the value lives.

use junk_generator::{GenerationRequest, JunkEngine, JunkError, JunkValue};
use std::sync::Arc;

/// Deferred value generation handed to a [`BindingSink`].
pub type Thunk = Box<dyn Fn() -> Result<JunkValue, JunkError> + Send + Sync>;

/// Separator used by [`junklet`] when none is given.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Receiver of named bindings.
///
/// Implementations are expected to evaluate `thunk` lazily and memoize the
/// result for the lifetime of a single test scenario.
pub trait BindingSink {
    fn bind(&mut self, name: &str, thunk: Thunk);
}

/// Bind each name to `"{name}{separator}{32 hex chars}"`.
///
/// Underscores in the value's name prefix are replaced by the separator, so
/// `first_name` with separator `-` produces `first-name-3f0c...`. The binding
/// itself keeps the original name.
pub fn junklet<I, S>(
    sink: &mut dyn BindingSink,
    engine: &Arc<JunkEngine>,
    names: I,
    separator: Option<&str>,
)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let separator = separator.unwrap_or(DEFAULT_SEPARATOR).to_string();

    for name in names {
        let name = name.as_ref();
        let prefix = format!("{}{separator}", name.replace('_', &separator));
        let engine = Arc::clone(engine);

        tracing::trace!(binding = name, "Binding junklet");
        sink.bind(
            name,
            Box::new(move || {
                let junk = engine.junk()?;
                Ok(JunkValue::String(format!("{prefix}{junk}")))
            }),
        );
    }
}

/// Bind `name` to `"{name}-{uuid v4}"`.
pub fn junk_let(sink: &mut dyn BindingSink, name: &str) {
    let prefix = name.to_string();

    tracing::trace!(binding = name, "Binding junk_let");
    sink.bind(
        name,
        Box::new(move || {
            Ok(JunkValue::String(format!(
                "{prefix}-{}",
                uuid::Uuid::new_v4()
            )))
        }),
    );
}

/// Bind `name` to the result of an arbitrary request.
pub fn let_junk(
    sink: &mut dyn BindingSink,
    engine: &Arc<JunkEngine>,
    name: &str,
    request: GenerationRequest,
) {
    let engine = Arc::clone(engine);

    tracing::trace!(binding = name, junk_type = ?request.junk_type, "Binding let_junk");
    sink.bind(name, Box::new(move || engine.generate(&request)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct RecordingSink {
        thunks: BTreeMap<String, Thunk>,
    }

    impl BindingSink for RecordingSink {
        fn bind(&mut self, name: &str, thunk: Thunk) {
            self.thunks.insert(name.to_string(), thunk);
        }
    }

    impl RecordingSink {
        fn resolve(&self, name: &str) -> String {
            let thunk = self.thunks.get(name).unwrap();
            thunk().unwrap().as_str().unwrap().to_string()
        }
    }

    #[test]
    fn test_junklet_default_separator() {
        let engine = Arc::new(JunkEngine::new());
        let mut sink = RecordingSink::default();
        junklet(&mut sink, &engine, ["first_name", "email"], None);

        let first = sink.resolve("first_name");
        let suffix = first.strip_prefix("first_name_").unwrap();
        assert_eq!(suffix.len(), 32);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(sink.resolve("email").starts_with("email_"));
    }

    #[test]
    fn test_junklet_custom_separator() {
        let engine = Arc::new(JunkEngine::new());
        let mut sink = RecordingSink::default();
        junklet(&mut sink, &engine, vec!["first_name".to_string()], Some("-"));

        assert!(sink.thunks.contains_key("first_name"));
        let value = sink.resolve("first_name");
        assert!(value.starts_with("first-name-"), "{value}");
        assert_eq!(value.len(), "first-name-".len() + 32);
    }

    #[test]
    fn test_junk_let_uses_uuid() {
        let mut sink = RecordingSink::default();
        junk_let(&mut sink, "token");

        let value = sink.resolve("token");
        let uuid = value.strip_prefix("token-").unwrap();
        assert!(uuid::Uuid::parse_str(uuid).is_ok());
    }

    #[test]
    fn test_let_junk_runs_request() {
        let engine = Arc::new(JunkEngine::new());
        let mut sink = RecordingSink::default();
        let_junk(&mut sink, &engine, "port", GenerationRequest::int().min(1024).max(1025));

        let thunk = sink.thunks.get("port").unwrap();
        assert_eq!(thunk().unwrap(), JunkValue::Int(1024));
    }

    #[test]
    fn test_thunks_are_lazy() {
        let engine = Arc::new(JunkEngine::new());
        let mut sink = RecordingSink::default();

        // Binding an unknown generator only fails once resolved
        let_junk(&mut sink, &engine, "missing", GenerationRequest::named("nope"));
        let thunk = sink.thunks.get("missing").unwrap();
        assert!(matches!(thunk(), Err(JunkError::UnrecognizedType(_))));
    }
}
