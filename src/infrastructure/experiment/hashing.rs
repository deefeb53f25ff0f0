//! Deterministic hashing for enrollment
//!
//! Ensures the same visitor always lands in the same variant bucket for a
//! given experiment, with no per-visitor state needed to decide.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic visitor-to-bucket hashing for experiment enrollment
#[derive(Debug, Clone, Copy)]
pub struct EnrollmentHasher;

impl EnrollmentHasher {
    /// Pick a variant bucket for a visitor and experiment
    ///
    /// The same (visitor, experiment) pair always maps to the same bucket,
    /// buckets are roughly uniform over `0..variant_count`, and different
    /// visitors are likely to land in different buckets. `variant_count`
    /// must be non-zero.
    pub fn bucket(visitor_id: &str, experiment: &str, variant_count: usize) -> usize {
        let mut hasher = DefaultHasher::new();
        visitor_id.hash(&mut hasher);
        experiment.hash(&mut hasher);
        (hasher.finish() % variant_count as u64) as usize
    }
}
