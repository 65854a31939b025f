//! Hex string generator.

use crate::random::RandomSource;

/// Generate a lowercase hex string of exactly `size` characters.
///
/// Draws `(size + 1) / 2` bytes and trims the last nibble for odd sizes.
pub fn generate_hex(rng: &dyn RandomSource, size: usize) -> String {
    let mut bytes = vec![0u8; size.div_ceil(2)];
    rng.fill_bytes(&mut bytes);
    let mut encoded = hex::encode(bytes);
    encoded.truncate(size);
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{OsRandom, SeededRandom};

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[test]
    fn test_generate_hex_sizes() {
        let rng = SeededRandom::new(42);

        for size in 0..=65 {
            let value = generate_hex(&rng, size);
            assert_eq!(value.len(), size);
            assert!(is_lower_hex(&value), "not hex: {value}");
        }
    }

    #[test]
    fn test_generate_hex_is_random() {
        let rng = OsRandom;
        assert_ne!(generate_hex(&rng, 32), generate_hex(&rng, 32));
    }

    #[test]
    fn test_generate_hex_deterministic() {
        let a = SeededRandom::new(9);
        let b = SeededRandom::new(9);
        assert_eq!(generate_hex(&a, 17), generate_hex(&b, 17));
    }
}
