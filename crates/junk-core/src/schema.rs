//! Declarative generator definitions.
//!
//! A `JunkSchema` lists named generators in YAML so that fixture suites can
//! share them without writing registration code:
//!
//! ```yaml
//! version: 1
//! seed: 42
//! max_retries: 10000
//! generators:
//!   - name: member_id
//!     type: int
//!     size: 6
//!   - name: state
//!     type: one_of
//!     values: [CA, NY, TX]
//!     exclude: TX
//!   - name: tracking_code
//!     type: hex
//!     size: 12
//!     format: "TRK-%s"
//!   - name: member_alias
//!     type: named
//!     generator: member_id
//! ```

use crate::values::JunkValue;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The same generator name appears twice
    #[error("Generator '{0}' is defined more than once")]
    DuplicateGenerator(String),
}

/// Generation strategy for a schema entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// Random lowercase hex string
    Hex {
        /// Number of characters (default 32)
        #[serde(default)]
        size: Option<usize>,
    },

    /// Random integer
    Int {
        /// Lower bound (inclusive)
        #[serde(default)]
        min: Option<i64>,
        /// Upper bound (exclusive)
        #[serde(default)]
        max: Option<i64>,
        /// Exact number of decimal digits
        #[serde(default)]
        size: Option<u32>,
    },

    /// Random boolean
    Bool,

    /// Random selection from a list of values
    OneOf {
        /// Values to select from
        values: Vec<serde_yaml::Value>,
    },

    /// Another generator, referenced by name
    Named {
        /// Name of the generator to delegate to
        generator: String,
    },
}

/// Output format for a schema entry.
///
/// `string` and `int` are coercion tags; any other string is a printf-style
/// template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum FormatConfig {
    /// Stringify the value
    String,
    /// Coerce the value to an integer
    Int,
    /// printf-style template
    Template(String),
}

impl From<String> for FormatConfig {
    fn from(value: String) -> Self {
        match value.as_str() {
            "string" => Self::String,
            "int" => Self::Int,
            _ => Self::Template(value),
        }
    }
}

impl From<FormatConfig> for String {
    fn from(value: FormatConfig) -> Self {
        match value {
            FormatConfig::String => "string".to_string(),
            FormatConfig::Int => "int".to_string(),
            FormatConfig::Template(template) => template,
        }
    }
}

/// A named generator entry in the schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorDefinition {
    /// Unique generator name
    pub name: String,

    /// Generation strategy
    #[serde(flatten)]
    pub generator: GeneratorConfig,

    /// Value or list of values to exclude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<serde_yaml::Value>,

    /// Output format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatConfig>,
}

impl GeneratorDefinition {
    /// Excluded values, flattened to a list.
    ///
    /// A scalar `exclude` yields a single-element list; a sequence yields its
    /// elements.
    pub fn excluded_values(&self) -> Vec<JunkValue> {
        match &self.exclude {
            None => Vec::new(),
            Some(serde_yaml::Value::Sequence(seq)) => seq.iter().map(JunkValue::from_yaml).collect(),
            Some(other) => vec![JunkValue::from_yaml(other)],
        }
    }
}

fn default_version() -> u32 {
    1
}

/// Full schema of named generators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JunkSchema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seed for deterministic generation. Absent means OS randomness.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Retry ceiling for exclusion. Absent means unbounded.
    #[serde(default)]
    pub max_retries: Option<u64>,

    /// Named generator definitions
    #[serde(default)]
    pub generators: Vec<GeneratorDefinition>,

    /// Cached generator lookup (not serialized)
    #[serde(skip)]
    generator_map: HashMap<String, usize>,
}

impl JunkSchema {
    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: JunkSchema = serde_yaml::from_str(yaml)?;
        schema.build_generator_map()?;
        Ok(schema)
    }

    /// Build the internal lookup map, rejecting duplicate names.
    fn build_generator_map(&mut self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for generator in &self.generators {
            if !seen.insert(generator.name.as_str()) {
                return Err(SchemaError::DuplicateGenerator(generator.name.clone()));
            }
        }
        self.generator_map = self
            .generators
            .iter()
            .enumerate()
            .map(|(idx, generator)| (generator.name.clone(), idx))
            .collect();
        Ok(())
    }

    /// Get a generator definition by name.
    pub fn get_generator(&self, name: &str) -> Option<&GeneratorDefinition> {
        self.generator_map
            .get(name)
            .and_then(|&idx| self.generators.get(idx))
    }

    /// Get all generator names in definition order.
    pub fn generator_names(&self) -> Vec<&str> {
        self.generators.iter().map(|g| g.name.as_str()).collect()
    }
}
