//! Sampling from materialized collections.

use crate::random::RandomSource;
use junk_core::JunkValue;

/// Pick a uniformly random element. Returns `None` for an empty slice.
pub fn sample(rng: &dyn RandomSource, values: &[JunkValue]) -> Option<JunkValue> {
    if values.is_empty() {
        return None;
    }
    values.get(rng.index(values.len())).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    #[test]
    fn test_sample_returns_member() {
        let rng = SeededRandom::new(42);
        let values: Vec<JunkValue> = vec!["a".into(), "b".into(), 3.into()];

        for _ in 0..100 {
            let picked = sample(&rng, &values).unwrap();
            assert!(values.contains(&picked));
        }
    }

    #[test]
    fn test_sample_covers_all_members() {
        let rng = SeededRandom::new(3);
        let values: Vec<JunkValue> = (1..=5).map(JunkValue::from).collect();

        let picked: Vec<JunkValue> = (0..500).map(|_| sample(&rng, &values).unwrap()).collect();
        for value in &values {
            assert!(picked.contains(value), "never sampled {value}");
        }
    }

    #[test]
    fn test_sample_empty() {
        let rng = SeededRandom::new(0);
        assert!(sample(&rng, &[]).is_none());
    }
}
