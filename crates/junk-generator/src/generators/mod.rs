//! Candidate generators for each built-in junk type.
//!
//! These functions only produce raw candidates; exclusion and formatting are
//! applied by the engine.

pub mod collection;
pub mod hex;
pub mod numeric;

pub use collection::sample;
pub use hex::generate_hex;
pub use numeric::{generate_int, IntConstraint, IntRange};
