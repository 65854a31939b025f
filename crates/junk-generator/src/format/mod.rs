//! Formatting of accepted candidates.
//!
//! Every format implements [`Formattable`]. The built-in variants live in
//! [`FormatSpec`]; user types plug in either directly through `Formattable`
//! or through [`JunkFormatter`], which is constructed from the candidate and
//! asked to format itself.

pub mod template;

use crate::error::JunkError;
use junk_core::JunkValue;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub use template::sprintf;

/// Capability of turning a raw candidate into its final value.
pub trait Formattable: Send + Sync {
    fn format(&self, raw: JunkValue) -> Result<JunkValue, JunkError>;
}

/// A formatter object built around a single candidate.
///
/// `new` may refuse inputs it cannot represent; the refusal surfaces as
/// [`JunkError::FormatterContract`].
///
/// ```rust
/// use junk_core::JunkValue;
/// use junk_generator::format::JunkFormatter;
///
/// struct HexTripler(i64);
///
/// impl JunkFormatter for HexTripler {
///     fn new(input: JunkValue) -> Option<Self> {
///         input.as_i64().map(HexTripler)
///     }
///
///     fn format(&self) -> JunkValue {
///         format!("0x{:02x}", self.0 * 3).into()
///     }
/// }
/// ```
pub trait JunkFormatter: Sized + 'static {
    fn new(input: JunkValue) -> Option<Self>;
    fn format(&self) -> JunkValue;
}

/// Adapts a [`JunkFormatter`] type into a [`Formattable`].
pub struct DelegateFormatter<F>(PhantomData<fn() -> F>);

impl<F> Default for DelegateFormatter<F> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<F: JunkFormatter> Formattable for DelegateFormatter<F> {
    fn format(&self, raw: JunkValue) -> Result<JunkValue, JunkError> {
        let kind = raw.kind();
        let formatter = F::new(raw).ok_or_else(|| JunkError::FormatterContract {
            formatter: std::any::type_name::<F>().to_string(),
            reason: format!("cannot be built from {kind} input"),
        })?;
        Ok(formatter.format())
    }
}

/// Function applied to the candidate by [`FormatSpec::Transform`].
pub type TransformFn = Arc<dyn Fn(JunkValue) -> JunkValue + Send + Sync>;

/// How an accepted candidate is formatted.
#[derive(Clone, Default)]
pub enum FormatSpec {
    /// Return the candidate unchanged
    #[default]
    Identity,
    /// Stringify the candidate
    ToString,
    /// Coerce the candidate to an integer
    ToInt,
    /// printf-style template; array candidates supply every argument
    Template(String),
    /// User-supplied formatter
    Delegate(Arc<dyn Formattable>),
    /// Function of the candidate
    Transform(TransformFn),
}

impl FormatSpec {
    /// printf-style template.
    pub fn template(template: impl Into<String>) -> Self {
        Self::Template(template.into())
    }

    /// Delegate to a [`JunkFormatter`] type.
    pub fn delegate<F: JunkFormatter>() -> Self {
        Self::Delegate(Arc::new(DelegateFormatter::<F>::default()))
    }

    /// Delegate to a formatter object.
    pub fn formatter(formatter: impl Formattable + 'static) -> Self {
        Self::Delegate(Arc::new(formatter))
    }

    /// Apply a function.
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(JunkValue) -> JunkValue + Send + Sync + 'static,
    {
        Self::Transform(Arc::new(f))
    }
}

impl Formattable for FormatSpec {
    fn format(&self, raw: JunkValue) -> Result<JunkValue, JunkError> {
        match self {
            Self::Identity => Ok(raw),
            Self::ToString => Ok(JunkValue::String(raw.to_string())),
            Self::ToInt => to_int(&raw).map(JunkValue::Int),
            Self::Template(template) => {
                let rendered = match &raw {
                    JunkValue::Array(args) => sprintf(template, args)?,
                    single => sprintf(template, std::slice::from_ref(single))?,
                };
                Ok(JunkValue::String(rendered))
            }
            Self::Delegate(formatter) => formatter.format(raw),
            Self::Transform(f) => Ok(f(raw)),
        }
    }
}

impl fmt::Debug for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::ToString => f.write_str("ToString"),
            Self::ToInt => f.write_str("ToInt"),
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Self::Delegate(_) => f.write_str("Delegate(..)"),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

/// Lenient integer coercion.
///
/// Strings contribute their leading optionally-signed digits (`"42abc"` is
/// 42, `"abc"` is 0); floats truncate; booleans map to 1/0; null is 0.
pub fn to_int(value: &JunkValue) -> Result<i64, JunkError> {
    match value {
        JunkValue::Null => Ok(0),
        JunkValue::Bool(b) => Ok(i64::from(*b)),
        JunkValue::Int(i) => Ok(*i),
        JunkValue::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
        JunkValue::Float(f) => Err(JunkError::Format(format!("{f} out of integer range"))),
        JunkValue::String(s) => Ok(leading_integer(s)),
        JunkValue::Array(_) => Err(JunkError::Format(
            "can't convert array into integer".to_string(),
        )),
    }
}

fn leading_integer(s: &str) -> i64 {
    let trimmed = s.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });
    if negative {
        -magnitude
    } else {
        magnitude
    }
}
