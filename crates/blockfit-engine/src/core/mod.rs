//! Core data structures: the board grid, piece shapes and the shape pools.

pub use self::{board::*, piece::*, shape_pool::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape_pool;

/// Number of rows and columns of the (square) board.
pub const BOARD_SIZE: usize = 8;
