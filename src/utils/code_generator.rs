//! Short code generation.

use rand::Rng;

/// Alphabet for generated codes: a-z, A-Z, 0-9.
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated codes. 62^6 ≈ 5.7e10 combinations, so collision
/// probability per draw stays negligible at production scale.
pub const CODE_LENGTH: usize = 6;

/// Generates a random fixed-length code from the alphanumeric alphabet.
///
/// Codes are not cryptographically unguessable and are not required to be;
/// uniqueness is enforced against the durable store by the caller.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
