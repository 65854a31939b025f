//! Property tests for generated junk.

use junk_generator::{EngineConfig, FormatSpec, GenerationRequest, JunkEngine, JunkValue};
use proptest::prelude::*;

proptest! {
    #[test]
    fn int_stays_in_half_open_range(seed in any::<u64>(), min in -1_000i64..1_000, span in 1i64..1_000) {
        let engine = JunkEngine::with_config(EngineConfig::seeded(seed));
        let request = GenerationRequest::int().min(min).max(min + span);

        let value = engine.generate(&request).unwrap().as_i64().unwrap();
        prop_assert!(value >= min && value < min + span);
    }

    #[test]
    fn sized_int_has_exact_digits(seed in any::<u64>(), size in 1usize..=18) {
        let engine = JunkEngine::with_config(EngineConfig::seeded(seed));
        let value = engine.generate(&GenerationRequest::int().size(size)).unwrap();

        prop_assert_eq!(value.to_string().len(), size);
    }

    #[test]
    fn hex_has_requested_length(seed in any::<u64>(), size in 0usize..200) {
        let engine = JunkEngine::with_config(EngineConfig::seeded(seed));
        let value = engine.generate(&GenerationRequest::raw_size(size)).unwrap();
        let hex = value.as_str().unwrap();

        prop_assert_eq!(hex.len(), size);
        prop_assert!(hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn excluded_values_never_returned(seed in any::<u64>(), excluded in prop::collection::vec(0i64..10, 0..9)) {
        let engine = JunkEngine::with_config(EngineConfig::seeded(seed));
        let request = GenerationRequest::int().max(10).exclude_values(excluded.clone());

        for _ in 0..20 {
            let value = engine.generate(&request).unwrap().as_i64().unwrap();
            prop_assert!(!excluded.contains(&value));
        }
    }

    #[test]
    fn sample_returns_member(seed in any::<u64>(), values in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let engine = JunkEngine::with_config(EngineConfig::seeded(seed));
        let request = GenerationRequest::sample(values.clone());

        let value = engine.generate(&request).unwrap();
        prop_assert!(values.iter().any(|v| JunkValue::from(v.as_str()) == value));
    }

    #[test]
    fn to_string_format_yields_strings(seed in any::<u64>()) {
        let engine = JunkEngine::with_config(EngineConfig::seeded(seed));
        let request = GenerationRequest::int().max(100).format(FormatSpec::ToString);

        let value = engine.generate(&request).unwrap();
        prop_assert!(value.as_str().is_some_and(|s| s.parse::<i64>().is_ok()));
    }
}
