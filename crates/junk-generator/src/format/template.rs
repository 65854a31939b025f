//! printf-style template substitution.
//!
//! Supported conversions: `%d %i %u %s %x %X %o %b %f %e %E %c %%`, with the
//! flags `-`, `0`, `+`, space and `#`, an optional width and an optional
//! precision. Missing arguments are an error; surplus arguments are ignored.

use crate::error::JunkError;
use junk_core::JunkValue;

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    alt: bool,
    width: usize,
    precision: Option<usize>,
}

/// Substitute `args` into `template`.
pub fn sprintf(template: &str, args: &[JunkValue]) -> Result<String, JunkError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0usize;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.left = true,
                '0' => spec.zero = true,
                '+' => spec.plus = true,
                ' ' => spec.space = true,
                '#' => spec.alt = true,
                _ => break,
            }
            chars.next();
        }
        spec.width = read_number(&mut chars).unwrap_or(0);
        if chars.peek() == Some(&'.') {
            chars.next();
            spec.precision = Some(read_number(&mut chars).unwrap_or(0));
        }

        let conversion = chars
            .next()
            .ok_or_else(|| JunkError::Format(format!("incomplete format specifier in {template:?}")))?;
        if conversion == '%' {
            out.push('%');
            continue;
        }

        let arg = args.get(next_arg).ok_or_else(|| {
            JunkError::Format(format!(
                "too few arguments for {template:?}: {} given",
                args.len()
            ))
        })?;
        next_arg += 1;

        let rendered = match conversion {
            'd' | 'i' | 'u' => render_integer(integer_arg(arg)?, 10, false, spec),
            'x' => render_integer(integer_arg(arg)?, 16, false, spec),
            'X' => render_integer(integer_arg(arg)?, 16, true, spec),
            'o' => render_integer(integer_arg(arg)?, 8, false, spec),
            'b' => render_integer(integer_arg(arg)?, 2, false, spec),
            'f' => render_float(float_arg(arg)?, FloatStyle::Fixed, spec),
            'e' => render_float(float_arg(arg)?, FloatStyle::Exponent { upper: false }, spec),
            'E' => render_float(float_arg(arg)?, FloatStyle::Exponent { upper: true }, spec),
            's' => {
                let text = arg.to_string();
                let text = match spec.precision {
                    Some(p) => text.chars().take(p).collect(),
                    None => text,
                };
                pad(String::new(), text, spec, false)
            }
            'c' => pad(String::new(), char_arg(arg)?.to_string(), spec, false),
            other => {
                return Err(JunkError::Format(format!(
                    "unsupported conversion '%{other}' in {template:?}"
                )))
            }
        };
        out.push_str(&rendered);
    }

    Ok(out)
}

fn read_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    value
}

fn integer_arg(arg: &JunkValue) -> Result<i64, JunkError> {
    match arg {
        JunkValue::Int(i) => Ok(*i),
        JunkValue::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
        JunkValue::String(s) => s
            .trim()
            .parse()
            .map_err(|_| JunkError::Format(format!("invalid value for integer: {s:?}"))),
        other => Err(JunkError::Format(format!(
            "can't convert {} into integer",
            other.kind()
        ))),
    }
}

fn float_arg(arg: &JunkValue) -> Result<f64, JunkError> {
    match arg {
        JunkValue::Int(i) => Ok(*i as f64),
        JunkValue::Float(f) => Ok(*f),
        JunkValue::String(s) => s
            .trim()
            .parse()
            .map_err(|_| JunkError::Format(format!("invalid value for float: {s:?}"))),
        other => Err(JunkError::Format(format!(
            "can't convert {} into float",
            other.kind()
        ))),
    }
}

fn char_arg(arg: &JunkValue) -> Result<char, JunkError> {
    match arg {
        JunkValue::Int(i) => u32::try_from(*i)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| JunkError::Format(format!("invalid character code {i}"))),
        JunkValue::String(s) => s
            .chars()
            .next()
            .ok_or_else(|| JunkError::Format("%c requires a character".to_string())),
        other => Err(JunkError::Format(format!(
            "can't convert {} into character",
            other.kind()
        ))),
    }
}

fn sign_of(negative: bool, spec: Spec) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn render_integer(value: i64, radix: u32, upper: bool, spec: Spec) -> String {
    let magnitude = value.unsigned_abs();
    let mut digits = match radix {
        16 if upper => format!("{magnitude:X}"),
        16 => format!("{magnitude:x}"),
        8 => format!("{magnitude:o}"),
        2 => format!("{magnitude:b}"),
        _ => magnitude.to_string(),
    };
    if let Some(precision) = spec.precision {
        if digits.len() < precision {
            digits = format!("{}{digits}", "0".repeat(precision - digits.len()));
        }
    }

    let prefix = match (spec.alt, radix) {
        (true, 16) if upper => "0X",
        (true, 16) => "0x",
        (true, 8) => "0",
        (true, 2) => "0b",
        _ => "",
    };
    let head = format!("{}{prefix}", sign_of(value < 0, spec));
    // A precision disables zero padding for integers.
    let zero_pad = spec.precision.is_none();
    pad(head, digits, spec, zero_pad)
}

enum FloatStyle {
    Fixed,
    Exponent { upper: bool },
}

fn render_float(value: f64, style: FloatStyle, spec: Spec) -> String {
    let head = sign_of(value.is_sign_negative() && !value.is_nan(), spec).to_string();
    if !value.is_finite() {
        let body = if value.is_nan() { "NaN" } else { "Inf" };
        return pad(head, body.to_string(), spec, false);
    }

    let precision = spec.precision.unwrap_or(6);
    let magnitude = value.abs();
    let body = match style {
        FloatStyle::Fixed => format!("{magnitude:.precision$}"),
        FloatStyle::Exponent { upper } => {
            let rendered = format!("{magnitude:.precision$e}");
            let (mantissa, exponent) = rendered.split_once('e').unwrap_or((&rendered, "0"));
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let marker = if upper { 'E' } else { 'e' };
            let exp_sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}{marker}{exp_sign}{:02}", exponent.unsigned_abs())
        }
    };
    pad(head, body, spec, true)
}

/// Apply width and justification. `head` holds the sign and radix prefix so
/// zero padding lands between it and the digits.
fn pad(head: String, body: String, spec: Spec, numeric: bool) -> String {
    let len = head.chars().count() + body.chars().count();
    if spec.width <= len {
        return format!("{head}{body}");
    }
    let fill = spec.width - len;
    if spec.left {
        format!("{head}{body}{}", " ".repeat(fill))
    } else if spec.zero && numeric {
        format!("{head}{}{body}", "0".repeat(fill))
    } else {
        format!("{}{head}{body}", " ".repeat(fill))
    }
}
