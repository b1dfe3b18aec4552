//! Game rules and session state.
//!
//! This module builds the turn logic on top of the [`core`](crate::core)
//! data structures:
//!
//! - [`PieceGenerator`] - level-weighted piece dealing with a reproducible [`PieceSeed`]
//! - [`is_valid_placement`] - bounds and overlap check for a piece at an anchor
//! - [`LineClear`] - full row/column detection and combo scoring
//! - [`Progression`] - score, level and best score
//! - [`Tray`] - the three pieces on offer
//! - [`GameSession`] - one game, from the first deal to game over
//!
//! # Turn Flow
//!
//! 1. The caller picks a tray slot and an anchor and calls
//!    [`GameSession::attempt_placement`]
//! 2. The piece's cells are filled on the board
//! 3. Every full row and column is cleared at once and scored
//! 4. Score and level are updated
//! 5. Once all three pieces are used the tray is refilled
//! 6. If no unused piece fits anywhere the game is over
//!
//! Each step reports what it changed as [`GameEvent`]s.
//!
//! # Example
//!
//! ```
//! use blockfit_engine::{GameSession, Rotation, TurnError};
//!
//! let mut session = GameSession::new(0);
//!
//! session.rotate_tray(Rotation::Clockwise).unwrap();
//!
//! // Nothing fits with its top-left cell off the board.
//! assert!(matches!(
//!     session.attempt_placement(-1, 0, 0),
//!     Err(TurnError::InvalidPlacement { .. })
//! ));
//! ```

pub use self::{
    event::*, game_session::*, game_stats::*, line_clear::*, piece_generator::*, placement::*,
    progression::*, tray::*,
};

mod event;
mod game_session;
mod game_stats;
mod line_clear;
mod piece_generator;
mod placement;
mod progression;
mod tray;
