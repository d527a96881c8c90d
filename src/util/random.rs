//! Random input arrays for sort runs

use rand::Rng;

/// Default lower bound for generated values
pub const DEFAULT_MIN: i64 = 5;

/// Default upper bound for generated values
pub const DEFAULT_MAX: i64 = 100;

/// Generate `n` integers uniformly distributed in `[min, max]`
pub fn random_array(n: usize, min: i64, max: i64) -> Vec<i64> {
    random_array_with(&mut rand::rng(), n, min, max)
}

/// Same as [`random_array`] but draws from the given RNG (seeded runs).
///
/// Inverted bounds are swapped rather than rejected.
pub fn random_array_with<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    min: i64,
    max: i64,
) -> Vec<i64> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    (0..n).map(|_| rng.random_range(lo..=hi)).collect()
}
