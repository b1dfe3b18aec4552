use crate::{
    core::{Block, Board, CellSet, Rotation},
    engine::{
        event::GameEvent,
        game_stats::GameStats,
        line_clear::{self, LineClear},
        piece_generator::{PieceGenerator, PieceSeed},
        placement,
        progression::Progression,
        tray::{Tray, TraySlotError},
    },
};

/// Whether a session still accepts moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Waiting for the next placement or rotation.
    AwaitingInput,
    /// No unused piece fits anywhere; only [`GameSession::restart`] is accepted.
    GameOver,
}

/// Why a request was rejected. A rejected request changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TurnError {
    #[display("the game is over")]
    GameOver,
    #[display("{_0}")]
    InvalidTraySlot(TraySlotError),
    #[display("piece does not fit at ({row}, {col})")]
    InvalidPlacement { row: isize, col: isize },
}

impl From<TraySlotError> for TurnError {
    fn from(err: TraySlotError) -> Self {
        TurnError::InvalidTraySlot(err)
    }
}

/// An accepted placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    clear: Option<LineClear>,
    events: Vec<GameEvent>,
}

impl PlacementOutcome {
    /// The lines cleared by the placement, if any.
    #[must_use]
    pub fn line_clear(&self) -> Option<&LineClear> {
        self.clear.as_ref()
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.clear.as_ref().map_or(0, LineClear::line_count)
    }

    #[must_use]
    pub fn points(&self) -> usize {
        self.clear.as_ref().map_or(0, LineClear::points)
    }

    /// Events in the order they happened.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

/// One game: board, tray, score and the generator that deals pieces.
///
/// Every request runs to completion before it returns; the resolving and
/// refilling steps of a turn are never observable from outside.
///
/// # Example
///
/// ```
/// use blockfit_engine::{GameSession, PieceSeed};
///
/// let seed: PieceSeed = "00000000000000000000000000000001".parse().unwrap();
/// let mut session = GameSession::with_seed(0, seed);
///
/// let (slot, row, col) = session.valid_placements().next().unwrap();
/// let outcome = session.attempt_placement(row, col, slot).unwrap();
///
/// assert_eq!(outcome.lines_cleared(), 0);
/// assert!(session.state().is_awaiting_input());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    tray: Tray,
    generator: PieceGenerator,
    progression: Progression,
    stats: GameStats,
    state: SessionState,
}

impl GameSession {
    /// Starts a game with a random seed, remembering a previously stored best
    /// score.
    #[must_use]
    pub fn new(high_score: usize) -> Self {
        Self::from_generator(high_score, PieceGenerator::new())
    }

    /// Like [`Self::new`], but dealing pieces from a specific seed.
    #[must_use]
    pub fn with_seed(high_score: usize, seed: PieceSeed) -> Self {
        Self::from_generator(high_score, PieceGenerator::with_seed(seed))
    }

    fn from_generator(high_score: usize, mut generator: PieceGenerator) -> Self {
        let progression = Progression::new(high_score);
        let tray = Tray::new(generator.generate_tray(progression.level()));
        Self {
            board: Board::EMPTY,
            tray,
            generator,
            progression,
            stats: GameStats::new(),
            state: SessionState::AwaitingInput,
        }
    }

    /// Starts a game from an explicit board and tray, at score 0 and level 1.
    ///
    /// An exhausted tray is refilled from `seed` right away. The game-over
    /// check runs on the first placement or rotation.
    #[must_use]
    pub fn from_position(seed: PieceSeed, board: Board, tray: Tray) -> Self {
        let mut generator = PieceGenerator::with_seed(seed);
        let progression = Progression::default();
        let tray = if tray.is_exhausted() {
            Tray::new(generator.generate_tray(progression.level()))
        } else {
            tray
        };
        Self {
            board,
            tray,
            generator,
            progression,
            stats: GameStats::new(),
            state: SessionState::AwaitingInput,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.progression.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.progression.level()
    }

    #[must_use]
    pub fn high_score(&self) -> usize {
        self.progression.high_score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns `true` if at least one unused piece fits somewhere.
    #[must_use]
    pub fn has_any_fit(&self) -> bool {
        self.tray
            .unused_pieces()
            .any(|(_, piece)| placement::fits_anywhere(&self.board, piece))
    }

    /// Enumerates every `(slot, anchor_row, anchor_col)` that would be
    /// accepted right now, slot by slot in row-major anchor order.
    pub fn valid_placements(&self) -> impl Iterator<Item = (usize, isize, isize)> + '_ {
        self.tray.unused_pieces().flat_map(move |(slot, piece)| {
            placement::valid_anchors(&self.board, piece).map(move |(row, col)| (slot, row, col))
        })
    }

    /// Places the piece of tray slot `slot` with its (0, 0) cell at the
    /// anchor, then resolves the turn.
    ///
    /// Resolving fills the covered cells, clears full lines, updates the
    /// score and level, refills the tray once every slot is used, and finally
    /// checks whether the game is over.
    pub fn attempt_placement(
        &mut self,
        anchor_row: isize,
        anchor_col: isize,
        slot: usize,
    ) -> Result<PlacementOutcome, TurnError> {
        self.ensure_playing()?;
        let piece = *self.tray.slot(slot)?;
        let cells = placement::placement_cells(&self.board, anchor_row, anchor_col, &piece)
            .ok_or(TurnError::InvalidPlacement {
                row: anchor_row,
                col: anchor_col,
            })?;

        // Filled on a copy so a failed cell leaves the session untouched.
        let mut board = self.board.clone();
        let mut events = Vec::with_capacity(cells.len());
        for (row, col) in cells {
            board
                .fill(row, col, piece.color())
                .map_err(|_| TurnError::InvalidPlacement {
                    row: anchor_row,
                    col: anchor_col,
                })?;
            events.push(GameEvent::CellChanged {
                row,
                col,
                block: Block::Filled(piece.color()),
            });
        }
        self.tray.take(slot)?;
        self.board = board;
        log::trace!("placed slot {slot} at ({anchor_row}, {anchor_col})");

        let clear = line_clear::clear_full_lines(&mut self.board);
        let lines = clear.as_ref().map_or(0, LineClear::line_count);
        self.stats.complete_placement(lines);

        if let Some(clear) = &clear {
            log::debug!(
                "cleared rows {:?} and columns {:?} for {} points",
                clear.rows(),
                clear.columns(),
                clear.points()
            );
            events.push(GameEvent::LinesCleared {
                rows: clear.rows().to_vec(),
                columns: clear.columns().to_vec(),
                points: clear.points(),
            });
            events.extend(clear.cells().iter().map(|(row, col)| GameEvent::CellChanged {
                row,
                col,
                block: Block::Empty,
            }));

            let change = self.progression.update_score(clear.points());
            events.push(GameEvent::ScoreChanged {
                score: change.score,
            });
            if let Some(level) = change.level {
                log::debug!("reached level {level}");
                events.push(GameEvent::LevelChanged { level });
            }
            if let Some(score) = change.new_high_score {
                events.push(GameEvent::NewHighScore { score });
            }
        }

        if self.tray.is_exhausted() {
            let pieces = self.generator.generate_tray(self.progression.level());
            log::debug!("refilled tray at level {}", self.progression.level());
            self.tray = Tray::new(pieces);
            events.push(GameEvent::TrayRefilled { pieces });
        }

        self.check_game_over(&mut events);
        Ok(PlacementOutcome { clear, events })
    }

    /// Rotates every unused tray piece by a quarter turn.
    pub fn rotate_tray(&mut self, rotation: Rotation) -> Result<Vec<GameEvent>, TurnError> {
        self.ensure_playing()?;
        self.tray.rotate_all(rotation);
        let mut events = Vec::new();
        self.check_game_over(&mut events);
        Ok(events)
    }

    /// Rotates the piece in tray slot `slot` by a quarter turn.
    pub fn rotate_slot(
        &mut self,
        slot: usize,
        rotation: Rotation,
    ) -> Result<Vec<GameEvent>, TurnError> {
        self.ensure_playing()?;
        self.tray.rotate_slot(slot, rotation)?;
        let mut events = Vec::new();
        self.check_game_over(&mut events);
        Ok(events)
    }

    /// Starts a new game on an empty board with a fresh tray. The best score
    /// is kept; everything else is reset.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        log::debug!("restarting after score {}", self.progression.score());
        let cleared = self.board.clear_cells(&CellSet::FULL);
        self.progression.reset();
        self.stats = GameStats::new();
        self.state = SessionState::AwaitingInput;

        let pieces = self.generator.generate_tray(self.progression.level());
        self.tray = Tray::new(pieces);
        let mut events: Vec<_> = cleared
            .iter()
            .map(|(row, col)| GameEvent::CellChanged {
                row,
                col,
                block: Block::Empty,
            })
            .collect();
        events.extend([
            GameEvent::ScoreChanged { score: 0 },
            GameEvent::LevelChanged { level: 1 },
            GameEvent::TrayRefilled { pieces },
        ]);
        self.check_game_over(&mut events);
        events
    }

    fn ensure_playing(&self) -> Result<(), TurnError> {
        if self.state.is_game_over() {
            return Err(TurnError::GameOver);
        }
        Ok(())
    }

    fn check_game_over(&mut self, events: &mut Vec<GameEvent>) {
        if self.state.is_game_over() || self.tray.is_exhausted() || self.has_any_fit() {
            return;
        }
        let final_score = self.progression.score();
        log::debug!("game over with score {final_score}");
        self.state = SessionState::GameOver;
        events.push(GameEvent::GameOver { final_score });
    }
}
