//! Random number generator construction.
//!
//! Every component that needs randomness owns its own generator. To keep a
//! seeded run reproducible while still giving each component an independent
//! stream, a single global seed is combined with a per-component stream id.

use blake2::{Blake2b512, Digest};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Stream id of the population pool (shuffles and patient identifiers).
pub const POPULATION_STREAM: &str = "population-pool";
/// Stream id of the medicine distribution sampler.
pub const MEDICINE_STREAM: &str = "medicine-distribution";
/// Stream id of the symptom distribution sampler.
pub const SYMPTOM_STREAM: &str = "symptom-distribution";
/// Stream id of the CSV writer's `hit` column.
pub const HIT_STREAM: &str = "output-hit";

/// Make a random number generator from a global seed and a stream id.
///
/// The stream id is concatenated with the global seed and the result is
/// hashed with BLAKE2b-512. The first 32 bytes of the digest seed a ChaCha8
/// generator, so distinct ids give unrelated streams for the same seed.
pub fn make_rng(global_seed: u64, stream_id: &str) -> ChaCha8Rng {
    let message = format!("{stream_id}{global_seed}");
    let mut hasher = Blake2b512::new();
    hasher.update(message);
    let digest = hasher.finalize();
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest[..32]);
    ChaCha8Rng::from_seed(seed)
}

/// Make a generator for `stream_id`, seeded from `global_seed` when given and
/// from OS entropy otherwise.
pub fn stream_rng(global_seed: Option<u64>, stream_id: &str) -> ChaCha8Rng {
    match global_seed {
        Some(seed) => make_rng(seed, stream_id),
        None => ChaCha8Rng::from_entropy(),
    }
}
