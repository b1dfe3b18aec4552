use serde::{Deserialize, Serialize};

use super::piece::PieceShape;

/// Difficulty tier the piece generator draws shapes from.
///
/// Variants are enumerated as pre-rotated shapes, so drawing a piece never
/// needs to rotate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::IsVariant)]
pub enum ShapePool {
    /// Monomino and dominoes.
    Small,
    /// The eleven four-cell variants.
    Tetromino,
    /// Larger five- and six-cell shapes, offered from level 3 on.
    Complex,
}

impl ShapePool {
    pub const ALL: [Self; 3] = [ShapePool::Small, ShapePool::Tetromino, ShapePool::Complex];

    /// Returns the shapes of this pool.
    #[must_use]
    pub const fn shapes(self) -> &'static [PieceShape] {
        match self {
            ShapePool::Small => &SMALL_SHAPES,
            ShapePool::Tetromino => &TETROMINO_SHAPES,
            ShapePool::Complex => &COMPLEX_SHAPES,
        }
    }
}

const C: bool = true;
const E: bool = false;

const SMALL_SHAPES: [PieceShape; 3] = [
    // 1x1
    PieceShape::from_cells([[C]]),
    // 1x2
    PieceShape::from_cells([[C, C]]),
    // 2x1
    PieceShape::from_cells([[C], [C]]),
];

const TETROMINO_SHAPES: [PieceShape; 11] = [
    // I
    PieceShape::from_cells([[C, C, C, C]]),
    PieceShape::from_cells([[C], [C], [C], [C]]),
    // O
    PieceShape::from_cells([[C, C], [C, C]]),
    // T
    PieceShape::from_cells([[C, C, C], [E, C, E]]),
    PieceShape::from_cells([[C, E], [C, C], [C, E]]),
    // S
    PieceShape::from_cells([[E, C, C], [C, C, E]]),
    // Z
    PieceShape::from_cells([[C, C, E], [E, C, C]]),
    // J
    PieceShape::from_cells([[E, C], [E, C], [C, C]]),
    PieceShape::from_cells([[C, E, E], [C, C, C]]),
    // L
    PieceShape::from_cells([[C, E], [C, E], [C, C]]),
    PieceShape::from_cells([[E, E, C], [C, C, C]]),
];

const COMPLEX_SHAPES: [PieceShape; 4] = [
    // 3x2 block
    PieceShape::from_cells([[C, C, C], [C, C, C]]),
    // U
    PieceShape::from_cells([[C, E, C], [C, C, C]]),
    // Big L
    PieceShape::from_cells([[C, E, E], [C, E, E], [C, C, C]]),
    // Big J
    PieceShape::from_cells([[E, E, C], [E, E, C], [C, C, C]]),
];
