//! Short code generation
//!
//! Produces candidate codes for new mappings. Candidates are random draws
//! with no uniqueness guarantee; collisions are detected and retried by the
//! mapping store.

use rand::{distr::Alphanumeric, Rng};

/// Every character a generated code may contain.
///
/// The `Alphanumeric` distribution samples uniformly from exactly this
/// 62-character set, so codes never need post-filtering.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default number of characters in a short code.
///
/// Six alphanumeric characters give 62^6 (~5.68e10) possible codes, keeping
/// collisions rare as long as the table stays far smaller than the code space.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Draws `length` characters independently and uniformly at random from
/// [`ALPHABET`].
pub fn generate(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
