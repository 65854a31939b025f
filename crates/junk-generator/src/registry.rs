//! Named generator registry.
//!
//! Generators are registered during setup, after which the registry can be
//! sealed and shared read-only between concurrently running tests.

use crate::error::JunkError;
use crate::request::GenerationRequest;
use junk_core::JunkSchema;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A request registered under a stable name.
#[derive(Debug, Clone)]
pub struct RegisteredGenerator {
    name: String,
    request: GenerationRequest,
}

impl RegisteredGenerator {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

/// Table of named generators.
#[derive(Debug, Default)]
pub struct GeneratorRegistry {
    generators: RwLock<HashMap<String, Arc<RegisteredGenerator>>>,
    sealed: AtomicBool,
}

impl GeneratorRegistry {
    /// Create an empty, unsealed registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `request` under `name`.
    ///
    /// Fails if the name is taken or the registry is sealed.
    pub fn register(
        &self,
        name: impl Into<String>,
        request: GenerationRequest,
    ) -> Result<(), JunkError> {
        let name = name.into();
        let mut generators = self.generators.write();
        if self.is_sealed() {
            return Err(JunkError::Sealed {
                action: "register",
                name,
            });
        }
        if generators.contains_key(&name) {
            return Err(JunkError::DuplicateName(name));
        }

        tracing::debug!(generator = %name, junk_type = ?request.junk_type, "Registered junk generator");
        generators.insert(
            name.clone(),
            Arc::new(RegisteredGenerator { name, request }),
        );
        Ok(())
    }

    /// Register every generator defined in a schema.
    ///
    /// Stops at the first failure; generators registered before it stay.
    pub fn register_schema(&self, schema: &JunkSchema) -> Result<(), JunkError> {
        for definition in &schema.generators {
            self.register(definition.name.clone(), GenerationRequest::from(definition))?;
        }
        Ok(())
    }

    /// Look up a generator by name.
    pub fn lookup(&self, name: &str) -> Option<Arc<RegisteredGenerator>> {
        self.generators.read().get(name).cloned()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.generators.read().contains_key(name)
    }

    /// Remove a generator, returning its request.
    ///
    /// Meant for resetting state between test runs; refused once sealed.
    pub fn unregister(&self, name: &str) -> Result<Option<GenerationRequest>, JunkError> {
        let mut generators = self.generators.write();
        if self.is_sealed() {
            return Err(JunkError::Sealed {
                action: "unregister",
                name: name.to_string(),
            });
        }
        Ok(generators
            .remove(name)
            .map(|registered| registered.request.clone()))
    }

    /// Refuse all further writes.
    pub fn seal(&self) {
        // Taking the write lock orders the seal after in-flight registrations.
        let guard = self.generators.write();
        if !self.sealed.swap(true, Ordering::SeqCst) {
            tracing::debug!(generators = guard.len(), "Sealed junk generator registry");
        }
    }

    /// Whether the registry has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::SeqCst)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.generators.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.generators.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::JunkType;

    #[test]
    fn test_register_and_lookup() {
        let registry = GeneratorRegistry::new();
        registry.register("pin", GenerationRequest::int().size(4)).unwrap();

        let registered = registry.lookup("pin").unwrap();
        assert_eq!(registered.name(), "pin");
        assert!(matches!(registered.request().junk_type, JunkType::Int));
        assert_eq!(registered.request().options.size, Some(4));
        assert!(registry.contains("pin"));
        assert!(registry.lookup("nope").is_none());
    }

    #[test]
    fn test_duplicate_name() {
        let registry = GeneratorRegistry::new();
        registry.register("foo", GenerationRequest::bool()).unwrap();

        let result = registry.register("foo", GenerationRequest::hex());
        assert!(matches!(result, Err(JunkError::DuplicateName(name)) if name == "foo"));

        // The original registration is untouched
        let registered = registry.lookup("foo").unwrap();
        assert!(matches!(registered.request().junk_type, JunkType::Bool));
    }

    #[test]
    fn test_unregister() {
        let registry = GeneratorRegistry::new();
        registry.register("foo", GenerationRequest::bool()).unwrap();

        let removed = registry.unregister("foo").unwrap();
        assert!(matches!(removed.map(|r| r.junk_type), Some(JunkType::Bool)));
        assert!(registry.is_empty());
        assert!(registry.unregister("foo").unwrap().is_none());

        // The name can be reused after removal
        registry.register("foo", GenerationRequest::hex()).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_seal_blocks_writes() {
        let registry = GeneratorRegistry::new();
        registry.register("a", GenerationRequest::bool()).unwrap();
        registry.seal();

        assert!(registry.is_sealed());
        assert!(matches!(
            registry.register("b", GenerationRequest::bool()),
            Err(JunkError::Sealed { action: "register", .. })
        ));
        assert!(matches!(
            registry.unregister("a"),
            Err(JunkError::Sealed { action: "unregister", .. })
        ));
        assert!(registry.lookup("a").is_some());
    }

    #[test]
    fn test_names_sorted() {
        let registry = GeneratorRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(name, GenerationRequest::hex()).unwrap();
        }
        assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_register_schema() {
        let schema = JunkSchema::from_yaml(
            r#"
generators:
  - name: member_id
    type: int
    size: 6
  - name: state
    type: one_of
    values: [CA, NY]
"#,
        )
        .unwrap();

        let registry = GeneratorRegistry::new();
        registry.register_schema(&schema).unwrap();
        assert_eq!(registry.names(), vec!["member_id", "state"]);

        let result = registry.register_schema(&schema);
        assert!(matches!(result, Err(JunkError::DuplicateName(name)) if name == "member_id"));
    }

    #[test]
    fn test_concurrent_reads_after_seal() {
        let registry = Arc::new(GeneratorRegistry::new());
        registry.register("shared", GenerationRequest::bool()).unwrap();
        registry.seal();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.lookup("shared").is_some())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
