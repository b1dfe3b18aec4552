use serde::{Deserialize, Serialize};

use crate::{
    core::{Block, Piece},
    engine::tray::TRAY_SIZE,
};

/// Something observable that happened while the session handled a request.
///
/// Events are returned in the order they happened so a front end can replay
/// them as animations or sounds; the session itself never calls back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum GameEvent {
    /// A board cell was filled or emptied.
    CellChanged { row: usize, col: usize, block: Block },
    /// Full lines were cleared by the last placement.
    LinesCleared {
        rows: Vec<usize>,
        columns: Vec<usize>,
        points: usize,
    },
    ScoreChanged { score: usize },
    LevelChanged { level: usize },
    /// The score went past the best score known so far.
    NewHighScore { score: usize },
    /// All tray slots were used and a fresh set was dealt.
    TrayRefilled { pieces: [Piece; TRAY_SIZE] },
    /// No remaining piece fits anywhere. Emitted once per game.
    GameOver { final_score: usize },
}
