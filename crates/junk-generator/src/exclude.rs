//! Candidate exclusion.
//!
//! An [`Exclusion`] describes which candidates to reject; the [`Excluder`]
//! applies it during the retry loop and decides whether the raw or the
//! formatted candidate is the one compared.

use junk_core::{JunkValue, ValueKind};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::sync::Arc;

/// Membership test against a collection that is never materialized.
pub trait Membership: Send + Sync {
    /// Whether `value` belongs to the collection.
    fn contains(&self, value: &JunkValue) -> bool;
}

impl Membership for Range<i64> {
    fn contains(&self, value: &JunkValue) -> bool {
        value.as_i64().is_some_and(|v| Range::contains(self, &v))
    }
}

impl Membership for RangeInclusive<i64> {
    fn contains(&self, value: &JunkValue) -> bool {
        value
            .as_i64()
            .is_some_and(|v| RangeInclusive::contains(self, &v))
    }
}

impl Membership for HashSet<i64> {
    fn contains(&self, value: &JunkValue) -> bool {
        value.as_i64().is_some_and(|v| HashSet::contains(self, &v))
    }
}

impl Membership for HashSet<String> {
    fn contains(&self, value: &JunkValue) -> bool {
        value.as_str().is_some_and(|v| HashSet::contains(self, v))
    }
}

impl Membership for BTreeSet<i64> {
    fn contains(&self, value: &JunkValue) -> bool {
        value.as_i64().is_some_and(|v| BTreeSet::contains(self, &v))
    }
}

impl Membership for BTreeSet<String> {
    fn contains(&self, value: &JunkValue) -> bool {
        value.as_str().is_some_and(|v| BTreeSet::contains(self, v))
    }
}

/// Arithmetic progression `start, start + step, ...` up to `end` inclusive.
///
/// Membership is computed arithmetically, so very long progressions cost
/// nothing to test against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRange {
    start: i64,
    end: i64,
    step: i64,
}

impl StepRange {
    /// Create a progression. A non-positive `step` yields an empty progression.
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        Self { start, end, step }
    }

    /// Iterate over the progression.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        let step = usize::try_from(self.step).unwrap_or(0);
        let take = if step == 0 || self.start > self.end {
            0
        } else {
            usize::MAX
        };
        (self.start..=self.end).step_by(step.max(1)).take(take)
    }
}

impl Membership for StepRange {
    fn contains(&self, value: &JunkValue) -> bool {
        let Some(v) = value.as_i64() else {
            return false;
        };
        self.step > 0
            && v >= self.start
            && v <= self.end
            && (i128::from(v) - i128::from(self.start)) % i128::from(self.step) == 0
    }
}

/// Predicate deciding whether a candidate is rejected.
pub type ExcludePredicate = Arc<dyn Fn(&JunkValue) -> bool + Send + Sync>;

/// Which candidates to reject.
#[derive(Clone)]
pub enum Exclusion {
    /// Reject candidates equal to this value
    Value(JunkValue),
    /// Reject candidates equal to any of these values
    Values(Vec<JunkValue>),
    /// Reject candidates contained in a collection
    Membership(Arc<dyn Membership>),
    /// Reject candidates for which the predicate returns true
    Predicate(ExcludePredicate),
}

impl Exclusion {
    /// Exclude a single value.
    pub fn value(value: impl Into<JunkValue>) -> Self {
        Self::Value(value.into())
    }

    /// Exclude a list of values.
    pub fn values<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<JunkValue>,
    {
        Self::Values(values.into_iter().map(Into::into).collect())
    }

    /// Exclude members of a collection.
    pub fn membership(collection: impl Membership + 'static) -> Self {
        Self::Membership(Arc::new(collection))
    }

    /// Exclude by predicate.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&JunkValue) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    /// Whether `candidate` is rejected.
    pub fn rejects(&self, candidate: &JunkValue) -> bool {
        match self {
            Self::Value(value) => value == candidate,
            Self::Values(values) => values.contains(candidate),
            Self::Membership(collection) => collection.contains(candidate),
            Self::Predicate(predicate) => predicate(candidate),
        }
    }

    /// Kinds of the literal values, or `None` for opaque exclusions.
    fn literal_kinds(&self) -> Option<Vec<ValueKind>> {
        match self {
            Self::Value(value) => Some(vec![value.kind()]),
            Self::Values(values) => Some(values.iter().map(JunkValue::kind).collect()),
            Self::Membership(_) | Self::Predicate(_) => None,
        }
    }
}

impl fmt::Debug for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Values(values) => f.debug_tuple("Values").field(values).finish(),
            Self::Membership(_) => f.write_str("Membership(..)"),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Applies an optional exclusion to candidates.
#[derive(Debug, Clone, Copy)]
pub struct Excluder<'a> {
    exclusion: Option<&'a Exclusion>,
}

impl<'a> Excluder<'a> {
    pub fn new(exclusion: Option<&'a Exclusion>) -> Self {
        Self { exclusion }
    }

    /// Whether any exclusion is configured.
    pub fn is_active(&self) -> bool {
        self.exclusion.is_some()
    }

    /// Whether `candidate` is rejected. Never rejects without an exclusion.
    pub fn rejects(&self, candidate: &JunkValue) -> bool {
        self.exclusion
            .is_some_and(|exclusion| exclusion.rejects(candidate))
    }

    /// Whether the formatted value could be the one compared for `raw`.
    ///
    /// True for literal exclusions none of whose values share the raw
    /// candidate's kind. When false, exclusion is decided on `raw` alone and
    /// rejected candidates never need formatting.
    pub fn may_inspect_formatted(&self, raw: &JunkValue) -> bool {
        self.exclusion
            .and_then(Exclusion::literal_kinds)
            .is_some_and(|kinds| !kinds.contains(&raw.kind()))
    }

    /// Whether exclusion should compare the formatted value instead of the raw one.
    ///
    /// True only for literal exclusions whose values all differ in kind from
    /// the raw candidate while at least one shares the formatted kind.
    pub fn inspects_formatted(&self, raw: &JunkValue, formatted: &JunkValue) -> bool {
        if !self.may_inspect_formatted(raw) {
            return false;
        }
        let formatted_kind = formatted.kind();
        raw.kind() != formatted_kind
            && self
                .exclusion
                .and_then(Exclusion::literal_kinds)
                .is_some_and(|kinds| kinds.contains(&formatted_kind))
    }
}
