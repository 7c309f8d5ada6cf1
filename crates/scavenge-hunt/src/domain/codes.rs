//! Human codes and share slugs.

use scavenge_core::rng::DeterministicRng;

/// Code alphabet: uppercase letters and digits without `0`, `O`, `I`, `1`.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Slug alphabet: lowercase letters and digits.
pub const SLUG_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a hunt code.
pub const CODE_LENGTH: usize = 6;

/// Length of a share slug.
pub const SLUG_LENGTH: usize = 12;

/// Collisions tolerated before giving up on a unique key.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

fn draw(rng: &mut dyn DeterministicRng, alphabet: &[u8], length: usize) -> String {
    // Alphabets are short ASCII constants; the index always fits.
    #[allow(clippy::cast_possible_truncation)]
    let max = (alphabet.len() - 1) as u32;
    (0..length)
        .map(|_| char::from(alphabet[rng.next_u32_range(0, max) as usize]))
        .collect()
}

/// Draws a six-character hunt code.
pub fn generate_code(rng: &mut dyn DeterministicRng) -> String {
    draw(rng, CODE_ALPHABET, CODE_LENGTH)
}

/// Draws a twelve-character share slug.
pub fn generate_slug(rng: &mut dyn DeterministicRng) -> String {
    draw(rng, SLUG_ALPHABET, SLUG_LENGTH)
}
