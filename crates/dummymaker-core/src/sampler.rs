//! Bounded Pareto sampling of identifier lists.
//!
//! A sample is produced in three steps:
//!
//! 1. Draw a count `c` uniformly from `[1, upper_limit]`.
//! 2. Draw `c` values from a Pareto distribution with shape `a` and minimum 0
//!    (a standard Pareto-I variate with scale 1, shifted down by 1), and
//!    truncate each toward zero.
//! 3. Keep a value only if it is below `N` and has not been kept already.
//!
//! The result is therefore a short, heavy-tailed, first-seen-ordered list of
//! distinct indices. It may be empty when every draw lands at or above `N`.

use rand::Rng;
use rand_distr::{Distribution, Pareto};
use tracing::trace;

use dummymaker_contracts::{
    config::{DistributionConfig, ParetoParams},
    error::{DummyError, DummyResult},
};

/// Samples short lists of distinct integers below `N`.
#[derive(Debug)]
pub struct BoundedParetoSampler<R> {
    params: ParetoParams,
    pareto: Pareto<f64>,
    rng: R,
}

impl<R: Rng> BoundedParetoSampler<R> {
    /// Build a sampler from a distribution config.
    ///
    /// `name` identifies the distribution in error messages. Returns
    /// `DummyError::ConfigError` when `N` or `a` is missing or zero.
    pub fn new(name: &str, config: &DistributionConfig, rng: R) -> DummyResult<Self> {
        let params = config.params(name)?;
        let pareto = Pareto::new(1.0, params.a).map_err(|e| DummyError::ConfigError {
            reason: format!("{name}: invalid Pareto shape {}: {e}", params.a),
        })?;
        Ok(Self { params, pareto, rng })
    }

    pub fn params(&self) -> ParetoParams {
        self.params
    }

    /// Draw one identifier list of at most `upper_limit` entries.
    ///
    /// An `upper_limit` of zero yields an empty list without consuming
    /// randomness.
    pub fn sample(&mut self, upper_limit: usize) -> Vec<u64> {
        if upper_limit == 0 {
            return Vec::new();
        }

        let count = self.rng.gen_range(1..=upper_limit);
        let mut problist = Vec::with_capacity(count);
        for _ in 0..count {
            let number = (self.pareto.sample(&mut self.rng) - 1.0) as u64;
            if (number as f64) < self.params.n && !problist.contains(&number) {
                problist.push(number);
            }
        }

        trace!(
            requested = count,
            kept = problist.len(),
            n = self.params.n,
            "pareto sample drawn"
        );
        problist
    }
}
