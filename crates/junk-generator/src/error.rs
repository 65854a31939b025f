//! Error type for junk generation.

/// Error type for generator, registry and formatter operations.
#[derive(Debug, thiserror::Error)]
pub enum JunkError {
    /// Unknown type discriminant or unregistered generator name
    #[error("Unrecognized junk type: '{0}'")]
    UnrecognizedType(String),

    /// A generator name was registered twice
    #[error("Junk type '{0}' has already been registered")]
    DuplicateName(String),

    /// A delegate formatter could not be built from the candidate
    #[error("Formatter {formatter} cannot format the candidate: {reason}")]
    FormatterContract { formatter: String, reason: String },

    /// An option is invalid or does not apply to the requested type
    #[error("Invalid option '{option}' for {junk_type} junk: {reason}")]
    InvalidOption {
        option: &'static str,
        junk_type: String,
        reason: String,
    },

    /// Template substitution or value coercion failed
    #[error("Format error: {0}")]
    Format(String),

    /// Every candidate was excluded until the retry ceiling was hit
    #[error("No acceptable candidate after {attempts} excluded attempts")]
    ExhaustedCandidates { attempts: u64 },

    /// Named generators reference each other too deeply (likely a cycle)
    #[error("Named generator '{name}' is nested more than {limit} levels deep")]
    RecursionLimit { name: String, limit: usize },

    /// The registry no longer accepts writes
    #[error("Generator registry is sealed; cannot {action} '{name}'")]
    Sealed { action: &'static str, name: String },

    /// Schema error
    #[error("Schema error: {0}")]
    Schema(#[from] junk_core::SchemaError),
}

impl JunkError {
    pub(crate) fn invalid_option(
        option: &'static str,
        junk_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            option,
            junk_type: junk_type.into(),
            reason: reason.into(),
        }
    }
}
