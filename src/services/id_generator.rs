//! Widget identifier generation.
//!
//! IDs are drawn from a single shared `StdRng`, optionally seeded so that a
//! run can be reproduced. Uniqueness is probabilistic: 32 symbols over a
//! 36-letter alphabet is far beyond what a run of a few thousand widgets
//! needs.

use crate::core::IdGenerator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Symbols an identifier is built from.
pub const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Random symbols on each side of the separator.
pub const ID_HALF_LENGTH: usize = 16;

/// Separator inserted at the midpoint for readability.
pub const ID_SEPARATOR: char = '-';

/// Create a random number generator, optionally seeded for reproducibility.
#[must_use]
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// `IdGenerator` backed by a shared random source.
#[derive(Debug)]
pub struct RandomIdGenerator {
    rng: Mutex<StdRng>,
}

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self::with_seed(None)
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        Self {
            rng: Mutex::new(create_rng(seed)),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let mut id = String::with_capacity(ID_HALF_LENGTH * 2 + 1);
        for i in 0..ID_HALF_LENGTH * 2 {
            if i == ID_HALF_LENGTH {
                id.push(ID_SEPARATOR);
            }
            let symbol = ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())];
            id.push(char::from(symbol));
        }
        id
    }
}
