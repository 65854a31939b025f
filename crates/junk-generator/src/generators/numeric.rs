//! Integer generator and constraint resolution.

use crate::error::JunkError;
use crate::random::RandomSource;

/// Default exclusive upper bound: 2^62 - 1.
pub const DEFAULT_INT_MAX: i64 = (1 << 62) - 1;

/// Largest digit count whose range fits in an `i64`.
pub const MAX_INT_DIGITS: usize = 18;

/// Integer bounds as requested, before resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntConstraint {
    /// Inclusive lower bound (default 0)
    pub min: Option<i64>,
    /// Exclusive upper bound (default 2^62 - 1)
    pub max: Option<i64>,
    /// Exact number of decimal digits
    pub size: Option<usize>,
}

/// Resolved half-open range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntConstraint {
    /// Resolve to a concrete range.
    ///
    /// `size` bounds the range to `[10^(size-1), 10^size)` and is intersected
    /// with explicit bounds. Inverted bounds are swapped rather than rejected.
    pub fn resolve(&self) -> Result<IntRange, JunkError> {
        let explicit_min = self.min.unwrap_or(0);
        let explicit_max = self.max.unwrap_or(DEFAULT_INT_MAX);

        let (mut min, mut max) = match self.size {
            Some(size) => {
                if size == 0 || size > MAX_INT_DIGITS {
                    return Err(JunkError::invalid_option(
                        "size",
                        "int",
                        format!("must be between 1 and {MAX_INT_DIGITS} digits, got {size}"),
                    ));
                }
                let exponent = size as u32;
                let sized_min = 10i64.pow(exponent - 1);
                let sized_max = 10i64.pow(exponent);
                (sized_min.max(explicit_min), sized_max.min(explicit_max))
            }
            None => (explicit_min, explicit_max),
        };

        if min > max {
            std::mem::swap(&mut min, &mut max);
        }

        Ok(IntRange { min, max })
    }
}

impl IntRange {
    /// Whether `value` lies in the range. A degenerate range holds only `min`.
    pub fn contains(&self, value: i64) -> bool {
        if self.min == self.max {
            value == self.min
        } else {
            (self.min..self.max).contains(&value)
        }
    }
}

/// Generate a random integer in the range. A degenerate range yields `min`.
pub fn generate_int(rng: &dyn RandomSource, range: IntRange) -> i64 {
    if range.min >= range.max {
        return range.min;
    }
    rng.int_in_range(range.min, range.max)
}
