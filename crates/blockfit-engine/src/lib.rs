//! Rules engine for an 8x8 block-placement puzzle.
//!
//! Pieces are dealt three at a time; placing one fills board cells, full rows
//! and columns clear for points, and the game ends once no remaining piece
//! fits anywhere. See [`GameSession`] for the entry point.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
