//! Seeded random streams shared by the environment and the agent

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The random generator a training run owns and threads through every call
pub type RngStream = ChaCha8Rng;

/// Create a reproducible stream from a seed
pub fn rng_from_seed(seed: u64) -> RngStream {
    RngStream::seed_from_u64(seed)
}

/// Draw a fresh seed from OS entropy, for runs that did not ask for one
pub fn entropy_seed() -> u64 {
    rand::rngs::OsRng.next_u64()
}
