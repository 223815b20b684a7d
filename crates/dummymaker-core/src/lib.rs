//! # dummymaker-core
//!
//! Sampling primitives and the generation loop for synthetic
//! medicine/symptom report datasets.
//!
//! This crate provides:
//! - The `PatientSource` and `RecordSink` traits
//! - `BoundedParetoSampler` for heavy-tailed identifier lists
//! - `DatasetGenerator`, which wires a patient source and two samplers into
//!   a stream of `DummyRecord`s
//! - Seeded, per-component random number generators
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dummymaker_core::{rng, BoundedParetoSampler, DatasetGenerator};
//!
//! let medicine = BoundedParetoSampler::new("medDistribution", &config.med_distribution,
//!     rng::make_rng(seed, rng::MEDICINE_STREAM))?;
//! ```

pub mod generator;
pub mod rng;
pub mod sampler;
pub mod traits;

pub use generator::DatasetGenerator;
pub use sampler::BoundedParetoSampler;
pub use traits::{MemorySink, PatientSource, RecordSink};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use dummymaker_contracts::{config::DistributionConfig, error::DummyError};

    use crate::{rng, BoundedParetoSampler};

    fn sampler(n: u64, a: f64, seed: u64) -> BoundedParetoSampler<ChaCha8Rng> {
        BoundedParetoSampler::new(
            "testDistribution",
            &DistributionConfig::new(n, a),
            ChaCha8Rng::seed_from_u64(seed),
        )
        .unwrap()
    }

    // ── BoundedParetoSampler ─────────────────────────────────────────────────

    /// Every sample is a list of distinct values below N, no longer than the
    /// requested upper limit.
    #[test]
    fn test_sample_distinct_and_bounded() {
        let mut s = sampler(30, 1.1, 1);
        for upper in [1usize, 5, 20, 64] {
            for _ in 0..200 {
                let list = s.sample(upper);
                assert!(list.len() <= upper, "len {} > upper {}", list.len(), upper);
                assert!(list.iter().all(|&v| v < 30));
                let distinct: HashSet<u64> = list.iter().copied().collect();
                assert_eq!(distinct.len(), list.len(), "duplicates in {:?}", list);
            }
        }
    }

    /// With N = 1 the only admissible value is 0, at most once.
    #[test]
    fn test_sample_with_n_one() {
        let mut s = sampler(1, 1.5, 2);
        for _ in 0..500 {
            let list = s.sample(20);
            assert!(list.is_empty() || list == vec![0], "unexpected list {:?}", list);
        }
    }

    /// A fractional bound admits every integer strictly below it.
    #[test]
    fn test_sample_with_fractional_n() {
        let mut s = BoundedParetoSampler::new(
            "testDistribution",
            &DistributionConfig { n: Some(1.5), a: Some(1.5) },
            ChaCha8Rng::seed_from_u64(8),
        )
        .unwrap();
        assert_eq!(s.params().n, 1.5);
        for _ in 0..500 {
            let list = s.sample(20);
            assert!(list.is_empty() || list == vec![0], "unexpected list {:?}", list);
        }
    }

    /// A heavy-tailed shape concentrates mass on small indices, so index 0
    /// must show up across many draws.
    #[test]
    fn test_sample_includes_zero() {
        let mut s = sampler(100, 1.5, 3);
        let seen_zero = (0..200).any(|_| s.sample(20).contains(&0));
        assert!(seen_zero, "index 0 never sampled");
    }

    #[test]
    fn test_sample_zero_upper_limit_is_empty() {
        let mut s = sampler(10, 1.0, 4);
        assert!(s.sample(0).is_empty());
    }

    #[test]
    fn test_sample_deterministic_for_seed() {
        let mut a = sampler(100, 1.5, 9);
        let mut b = sampler(100, 1.5, 9);
        for _ in 0..20 {
            assert_eq!(a.sample(20), b.sample(20));
        }
    }

    #[test]
    fn test_sampler_rejects_missing_params() {
        let result = BoundedParetoSampler::new(
            "medDistribution",
            &DistributionConfig { n: Some(10.0), a: None },
            ChaCha8Rng::seed_from_u64(0),
        );
        match result {
            Err(DummyError::ConfigError { reason }) => {
                assert!(reason.contains("medDistribution.a"))
            }
            other => panic!("expected ConfigError, got {:?}", other.map(|s| s.params())),
        }
    }

    // ── rng ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_make_rng_reproducible_per_stream() {
        let mut a = rng::make_rng(42, rng::MEDICINE_STREAM);
        let mut b = rng::make_rng(42, rng::MEDICINE_STREAM);
        let mut c = rng::make_rng(42, rng::SYMPTOM_STREAM);

        let xa: Vec<u64> = (0..8).map(|_| a.gen()).collect();
        let xb: Vec<u64> = (0..8).map(|_| b.gen()).collect();
        let xc: Vec<u64> = (0..8).map(|_| c.gen()).collect();

        assert_eq!(xa, xb);
        assert_ne!(xa, xc, "distinct stream ids must give distinct streams");
    }

    #[test]
    fn test_stream_rng_uses_seed_when_present() {
        let mut seeded = rng::stream_rng(Some(5), rng::HIT_STREAM);
        let mut direct = rng::make_rng(5, rng::HIT_STREAM);
        assert_eq!(seeded.gen::<u64>(), direct.gen::<u64>());
    }
}
