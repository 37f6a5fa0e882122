//! Random nickname generator.
//!
//! Used to recover when the server refuses a nickname: the replacement is an
//! 8-character string of vowels (e.g. `aEuoIaUe`), which fits the 9-character
//! limit of most networks.

use rand::RngExt;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'A', 'E', 'I', 'O', 'U'];

pub const NICK_LEN: usize = 8;

/// Generate a random nickname of `len` vowels from the given source.
pub fn generate_nickname(rng: &mut impl RngExt, len: usize) -> String {
    (0..len)
        .map(|_| VOWELS[rng.random_range(0..VOWELS.len())])
        .collect()
}
