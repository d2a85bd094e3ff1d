use serde::{Deserialize, Serialize};

/// The increment added to the state before every step.
const PRNG_INCREMENT: u32 = 0x6D2B_79F5;
/// `2^32` as a float, the exclusive upper bound of a mixed state.
const PRNG_RANGE: f64 = 4_294_967_296.0;
/// 32-bit FNV-1a offset basis.
const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
/// 32-bit FNV-1a prime.
const FNV_PRIME: u32 = 0x0100_0193;

/// A seeded pseudo-random number generator with 32 bits of state (mulberry32).
///
/// Every player runs their own copy of the bag, so each step must produce bit-identical
/// results on every implementation. Changing this function breaks every game in progress.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prng {
    state: u32,
}

impl Prng {
    /// # Returns
    ///
    /// A [`Prng`] whose state is `seed`.
    #[inline]
    pub fn new(seed: u32) -> Prng {
        Prng { state: seed }
    }

    /// The current 32-bit state.
    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state once.
    ///
    /// # Returns
    ///
    /// A float in the range `0` inclusive to `1` exclusive derived from the new state.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(PRNG_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / PRNG_RANGE
    }

    /// Advances the state once.
    ///
    /// # Returns
    ///
    /// An index in the range `0` inclusive to `len` exclusive, or `0` when `len` is `0`.
    pub fn next_index(&mut self, len: usize) -> usize {
        // the product is always below len, flooring keeps it there
        let index = (self.next_f64() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}

/// Converts a user supplied seed into the initial state of a [`Prng`].
///
/// * A decimal number that fits into 32 bits is used as is.
/// * A `0x` prefixed hexadecimal number that fits into 32 bits is used as is.
/// * Any other string is hashed with 32-bit FNV-1a over its UTF-8 bytes.
///
/// Surrounding whitespace is ignored.
pub fn parse_seed(seed: &str) -> u32 {
    let trimmed = seed.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => trimmed.parse::<u32>().ok(),
    };

    parsed.unwrap_or_else(|| {
        trimmed.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_outputs_for_seed_one() {
        let mut prng = Prng::new(1);

        assert_eq!(0.6270739405881613, prng.next_f64());
        assert_eq!(0.002735721180215478, prng.next_f64());
        assert_eq!(0.5274470399599522, prng.next_f64());
        assert_eq!(1199730144, prng.state());
    }

    #[test]
    fn state_advances_by_increment() {
        let mut prng = Prng::new(1);

        for _ in 0..5 {
            prng.next_f64();
        }

        assert_eq!(567894474, prng.state());
    }

    #[test]
    fn next_index_in_range() {
        let mut prng = Prng::new(rand::random());

        for len in 1..50 {
            assert!(prng.next_index(len) < len);
        }
        assert_eq!(0, prng.next_index(0));
    }

    #[test]
    fn parse_seed_decimal() {
        assert_eq!(1, parse_seed("1"));
        assert_eq!(u32::MAX, parse_seed(" 4294967295 "));
    }

    #[test]
    fn parse_seed_hex() {
        assert_eq!(0xBEEF, parse_seed("0xbeef"));
        assert_eq!(0xBEEF, parse_seed("0XBEEF"));
    }

    #[test]
    fn parse_seed_hashes_words() {
        assert_eq!(440920331, parse_seed("abc"));
        assert_eq!(1335831723, parse_seed("hello"));
        // too large for 32 bits, so hashed instead of wrapped
        assert_ne!(0, parse_seed("4294967296"));
        assert_eq!(parse_seed("4294967296"), parse_seed("4294967296"));
    }
}
