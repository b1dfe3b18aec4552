use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    core::{Piece, PieceShape, ShapePool},
    engine::tray::TRAY_SIZE,
};

/// First level at which complex shapes can be dealt.
pub const COMPLEX_POOL_LEVEL: usize = 3;

/// Deals pieces with a level-dependent mix of shape pools.
///
/// # Pool selection
///
/// A number `r` is drawn uniformly from `[0, 1)`:
///
/// | Level | Small       | Tetromino        | Complex    |
/// |-------|-------------|------------------|------------|
/// | 1-2   | `r < 0.4`   | `r >= 0.4`       | never      |
/// | 3+    | `r < 0.2`   | `0.2 <= r < 0.8` | `r >= 0.8` |
///
/// The shape is then uniform within the pool and the color is uniform over
/// the palette. Apart from the random number generator, no state is carried
/// between calls.
///
/// # Example
///
/// ```
/// use blockfit_engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut first = PieceGenerator::with_seed(seed);
/// let mut second = PieceGenerator::with_seed(seed);
///
/// assert_eq!(first.generate_tray(1), second.generate_tray(1));
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit value written as 32 hex digits, both in serialized form and
/// through [`FromStr`]/[`Display`](fmt::Display). The same seed always
/// deals the same sequence of pieces for the same sequence of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

/// Why a string is not a valid [`PieceSeed`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    Length { len: usize },
    #[display("invalid hex: {text}")]
    Digits { text: String },
}

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::Length { len: s.len() });
        }
        // `from_str_radix` accepts a leading sign, which is not a hex digit.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError::Digits { text: s.to_owned() });
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| ParseSeedError::Digits { text: s.to_owned() })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Picks the pool for `level` from a draw `r` in `[0, 1)`.
///
/// ```
/// use blockfit_engine::{ShapePool, select_pool};
///
/// assert_eq!(select_pool(1, 0.39), ShapePool::Small);
/// assert_eq!(select_pool(2, 0.4), ShapePool::Tetromino);
/// assert_eq!(select_pool(3, 0.8), ShapePool::Complex);
/// ```
#[must_use]
pub fn select_pool(level: usize, r: f64) -> ShapePool {
    if level < COMPLEX_POOL_LEVEL {
        if r < 0.4 {
            ShapePool::Small
        } else {
            ShapePool::Tetromino
        }
    } else if r < 0.2 {
        ShapePool::Small
    } else if r < 0.8 {
        ShapePool::Tetromino
    } else {
        ShapePool::Complex
    }
}

impl PieceGenerator {
    /// Creates a generator seeded from the thread-local random source.
    ///
    /// For reproducible games, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Deals one piece for a game at `level`.
    pub fn generate(&mut self, level: usize) -> Piece {
        let pool = select_pool(level, self.rng.random::<f64>());
        let shapes = pool.shapes();
        // Pools are never empty.
        let shape: PieceShape = shapes
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(shapes[0]);
        let color = self.rng.random();
        Piece::new(shape, color)
    }

    /// Deals the pieces of a full tray refill.
    pub fn generate_tray(&mut self, level: usize) -> [Piece; TRAY_SIZE] {
        std::array::from_fn(|_| self.generate(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    fn pool_of(piece: &Piece) -> ShapePool {
        ShapePool::ALL
            .into_iter()
            .find(|pool| pool.shapes().contains(piece.shape()))
            .unwrap()
    }

    #[test]
    fn test_select_pool_boundaries() {
        assert_eq!(select_pool(1, 0.0), ShapePool::Small);
        assert_eq!(select_pool(1, 0.399), ShapePool::Small);
        assert_eq!(select_pool(1, 0.4), ShapePool::Tetromino);
        assert_eq!(select_pool(2, 0.999), ShapePool::Tetromino);
        assert_eq!(select_pool(3, 0.199), ShapePool::Small);
        assert_eq!(select_pool(3, 0.2), ShapePool::Tetromino);
        assert_eq!(select_pool(3, 0.799), ShapePool::Tetromino);
        assert_eq!(select_pool(3, 0.8), ShapePool::Complex);
        assert_eq!(select_pool(50, 0.999), ShapePool::Complex);
    }

    #[test]
    fn test_no_complex_before_level_three() {
        let mut generator = PieceGenerator::with_seed(SEED);
        for _ in 0..500 {
            assert_ne!(pool_of(&generator.generate(2)), ShapePool::Complex);
        }
    }

    #[test]
    fn test_all_pools_reached_from_level_three() {
        let mut generator = PieceGenerator::with_seed(SEED);
        let pools: Vec<_> = (0..500).map(|_| pool_of(&generator.generate(3))).collect();
        for pool in ShapePool::ALL {
            assert!(pools.contains(&pool), "{pool:?} never dealt");
        }
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let mut first = PieceGenerator::with_seed(SEED);
        let mut second = PieceGenerator::with_seed(SEED);
        for level in 1..20 {
            assert_eq!(first.generate(level), second.generate(level));
        }
    }

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = PieceSeed([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_parse_uppercase_hex() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.to_bytes()[..2], [0x01, 0x23]);
        }

        #[test]
        fn test_error_wrong_length() {
            assert_eq!(
                "abc".parse::<PieceSeed>(),
                Err(ParseSeedError::Length { len: 3 })
            );
            let result: Result<PieceSeed, _> = serde_json::from_str("\"\"");
            assert!(result.unwrap_err().to_string().contains("invalid hex"));
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let result: Result<PieceSeed, _> =
                serde_json::from_str("\"ghijklmnopqrstuvwxyzghijklmnopqr\"");
            assert!(result.unwrap_err().to_string().contains("invalid hex"));
            assert!("+0123456789abcdef0123456789abcde".parse::<PieceSeed>().is_err());
        }
    }
}
