//! End-to-end turns through [`GameSession`] on hand-built positions.

use blockfit_engine::{
    Block, BlockColor, Board, GameEvent, GameSession, Piece, PieceSeed, PieceShape, Rotation,
    SessionState, ShapePool, Tray, TurnError,
};

const SEED: &str = "a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5";

fn seed() -> PieceSeed {
    SEED.parse().unwrap()
}

fn piece(art: &str) -> Piece {
    Piece::new(PieceShape::from_ascii(art).unwrap(), BlockColor::Yellow)
}

fn game_over_count(events: &[GameEvent]) -> usize {
    events.iter().filter(|event| event.is_game_over()).count()
}

#[test]
fn four_bars_in_a_square_clear_nothing() {
    let bar = piece("####");
    let mut session = GameSession::from_position(seed(), Board::EMPTY, Tray::new([bar, bar, bar]));
    for (slot, row) in [(0, 0), (1, 1), (2, 2)] {
        let outcome = session.attempt_placement(row, 0, slot).unwrap();
        assert_eq!(outcome.lines_cleared(), 0);
    }

    // The fourth bar goes through a new session on the resulting board, since
    // the tray was refilled from the generator.
    let mut session = GameSession::from_position(
        seed(),
        session.board().clone(),
        Tray::from_slots([Some(bar), None, None]),
    );
    let outcome = session.attempt_placement(3, 0, 0).unwrap();

    assert_eq!(outcome.lines_cleared(), 0);
    assert!(!outcome.events().iter().any(GameEvent::is_lines_cleared));
    assert_eq!(session.score(), 0);
    assert_eq!(session.board().occupied_count(), 16);
    assert_eq!(
        session.board().to_string(),
        "YYYY....\nYYYY....\nYYYY....\nYYYY....\n........\n........\n........\n........\n"
    );
}

#[test]
fn completing_one_row_scores_one_line() {
    let board = Board::from_ascii(
        "
        ........
        ........
        ........
        ........
        ........
        ####..##
        ........
        ........
        ",
    );
    let mut session = GameSession::from_position(
        seed(),
        board,
        Tray::from_slots([Some(piece("##")), Some(piece("#")), None]),
    );
    let outcome = session.attempt_placement(5, 4, 0).unwrap();

    let clear = outcome.line_clear().unwrap();
    assert_eq!(clear.rows(), &[5]);
    assert!(clear.columns().is_empty());
    assert_eq!(outcome.lines_cleared(), 1);
    assert_eq!(outcome.points(), 100);
    assert_eq!(session.score(), 100);
    assert!(session.board().is_empty());
}

#[test]
fn two_rows_and_a_column_score_a_triple_combo() {
    let board = Board::from_ascii(
        "
        .#######
        .#######
        #.......
        #.......
        #.......
        #....#..
        #.......
        #.......
        ",
    );
    let mut session = GameSession::from_position(
        seed(),
        board,
        Tray::from_slots([Some(piece("#/#")), Some(piece("#")), None]),
    );
    let outcome = session.attempt_placement(0, 0, 0).unwrap();

    let clear = outcome.line_clear().unwrap();
    assert_eq!(clear.rows(), &[0, 1]);
    assert_eq!(clear.columns(), &[0]);
    assert_eq!(outcome.lines_cleared(), 3);
    assert_eq!(outcome.points(), 600);
    // The two cells where the rows cross the column are cleared once.
    assert_eq!(clear.cells().len(), 16 + 6);
    let emptied = outcome
        .events()
        .iter()
        .filter(|event| matches!(event, GameEvent::CellChanged { block, .. } if block.is_empty()))
        .count();
    assert_eq!(emptied, 22);

    assert_eq!(session.board().occupied_count(), 1);
    assert_eq!(session.board().is_occupied(5, 5), Ok(true));
    assert_eq!(session.score(), 600);
    assert_eq!(session.level(), 2);
    assert!(outcome.events().contains(&GameEvent::LevelChanged { level: 2 }));
    assert!(outcome.events().contains(&GameEvent::NewHighScore { score: 600 }));
}

// Isolated one-cell holes: no two empty cells are neighbors, and every row
// and column keeps a hole after (0, 0) is filled.
const NEAR_FULL: &str = "
    .#.#####
    #.######
    .#.#####
    ###.####
    ####.###
    #####.##
    ######.#
    #######.
";

#[test]
fn game_over_fires_once_and_blocks_input() {
    let mut session = GameSession::from_position(
        seed(),
        Board::from_ascii(NEAR_FULL),
        Tray::new([piece("#"), piece("##"), piece("#/#")]),
    );
    let outcome = session.attempt_placement(0, 0, 0).unwrap();

    assert_eq!(outcome.lines_cleared(), 0);
    assert_eq!(game_over_count(outcome.events()), 1);
    assert_eq!(outcome.events().last(), Some(&GameEvent::GameOver { final_score: 0 }));
    assert_eq!(session.state(), SessionState::GameOver);
    assert!(!session.has_any_fit());

    let board = session.board().clone();
    assert_eq!(session.attempt_placement(0, 2, 1), Err(TurnError::GameOver));
    assert_eq!(session.rotate_tray(Rotation::Clockwise), Err(TurnError::GameOver));
    assert_eq!(
        session.rotate_slot(2, Rotation::CounterClockwise),
        Err(TurnError::GameOver)
    );
    assert_eq!(session.board(), &board);
    assert!(session.state().is_game_over());

    let events = session.restart();
    assert_eq!(game_over_count(&events), 0);
    assert!(session.state().is_awaiting_input());
}

#[test]
fn tray_with_no_fit_ends_the_game_on_rotation() {
    let mut session = GameSession::from_position(
        seed(),
        Board::from_ascii(NEAR_FULL),
        Tray::new([piece("##"), piece("###"), piece("##/##")]),
    );
    let events = session.rotate_tray(Rotation::Clockwise).unwrap();
    assert_eq!(events, vec![GameEvent::GameOver { final_score: 0 }]);
    assert_eq!(session.rotate_tray(Rotation::Clockwise), Err(TurnError::GameOver));
}

#[test]
fn restart_resets_the_game_but_not_the_best_score() {
    let board = Board::from_ascii("######..");
    let mut session = GameSession::from_position(
        seed(),
        board,
        Tray::from_slots([Some(piece("##")), Some(piece("#")), None]),
    );
    session.attempt_placement(0, 6, 0).unwrap();
    assert_eq!(session.score(), 100);
    session.attempt_placement(4, 2, 1).unwrap();
    let filled_before = session.board().occupied_count();
    assert_eq!(filled_before, 1);

    let events = session.restart();
    let emptied: Vec<_> = events
        .iter()
        .take_while(|event| event.is_cell_changed())
        .collect();
    assert_eq!(
        emptied,
        vec![&GameEvent::CellChanged {
            row: 4,
            col: 2,
            block: Block::Empty
        }]
    );
    assert_eq!(events[filled_before], GameEvent::ScoreChanged { score: 0 });

    assert!(session.board().is_empty());
    assert_eq!(session.score(), 0);
    assert_eq!(session.level(), 1);
    assert_eq!(session.high_score(), 100);
    assert_eq!(session.tray().unused_pieces().count(), 3);
    assert_eq!(session.stats().placed_pieces(), 0);
    assert!(events.contains(&GameEvent::ScoreChanged { score: 0 }));
    assert!(events.iter().any(GameEvent::is_tray_refilled));
}

fn numbered_seed(n: u8) -> PieceSeed {
    let mut bytes = [0xc3; 16];
    bytes[0] = n;
    PieceSeed::from_bytes(bytes)
}

fn refilled_pieces(events: &[GameEvent]) -> [Piece; 3] {
    events
        .iter()
        .find_map(|event| match event {
            GameEvent::TrayRefilled { pieces } => Some(*pieces),
            _ => None,
        })
        .unwrap()
}

#[test]
fn refilled_tray_is_checked_for_game_over() {
    // Only a single cell fits the isolated holes of the board, so the game
    // ends right after the refill unless a 1x1 piece was dealt.
    let mut ended = 0;
    for n in 0..64 {
        let mut session = GameSession::from_position(
            numbered_seed(n),
            Board::from_ascii(NEAR_FULL),
            Tray::from_slots([Some(piece("#")), None, None]),
        );
        let outcome = session.attempt_placement(0, 0, 0).unwrap();
        let events = outcome.events();
        assert_eq!(outcome.lines_cleared(), 0);

        let pieces = refilled_pieces(events);
        let any_fits = pieces.iter().any(|piece| piece.shape().cell_count() == 1);
        assert_eq!(session.has_any_fit(), any_fits);
        if any_fits {
            assert_eq!(game_over_count(events), 0);
            assert!(session.state().is_awaiting_input());
        } else {
            ended += 1;
            let refill_at = events.iter().position(GameEvent::is_tray_refilled).unwrap();
            assert_eq!(game_over_count(events), 1);
            assert_eq!(refill_at + 2, events.len());
            assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 0 }));
            assert!(session.state().is_game_over());
        }
    }
    assert!(ended > 0);
}

#[test]
fn refill_deals_complex_pieces_from_level_three() {
    // Filling the top-left square completes rows 0 and 1 and columns 0 and 1:
    // four lines for 1200 points, enough to reach level 3 in one turn.
    let board = Board::from_ascii(
        "
        ..######
        ..######
        ##......
        ##......
        ##......
        ##......
        ##......
        ##......
        ",
    );
    let is_complex = |piece: &Piece| ShapePool::Complex.shapes().contains(piece.shape());

    let mut complex_dealt = 0;
    for n in 0..32 {
        let mut session = GameSession::from_position(
            numbered_seed(n),
            board.clone(),
            Tray::from_slots([Some(piece("##/##")), None, None]),
        );
        let outcome = session.attempt_placement(0, 0, 0).unwrap();
        assert_eq!(outcome.lines_cleared(), 4);
        assert_eq!(outcome.points(), 1200);
        assert_eq!(session.level(), 3);
        assert!(outcome.events().contains(&GameEvent::LevelChanged { level: 3 }));
        assert!(session.board().is_empty());
        complex_dealt += refilled_pieces(outcome.events())
            .iter()
            .filter(|&piece| is_complex(piece))
            .count();

        // Without a level-up the refill stays on the level 1 pools.
        let mut session = GameSession::from_position(
            numbered_seed(n),
            Board::EMPTY,
            Tray::from_slots([Some(piece("#")), None, None]),
        );
        let outcome = session.attempt_placement(0, 0, 0).unwrap();
        assert_eq!(session.level(), 1);
        assert!(!refilled_pieces(outcome.events()).iter().any(is_complex));
    }
    assert!(complex_dealt > 0);
}

#[test]
fn same_seed_plays_the_same_game() {
    fn play(seed: PieceSeed) -> (usize, Board) {
        let mut session = GameSession::with_seed(0, seed);
        for _ in 0..60 {
            let Some((slot, row, col)) = session.valid_placements().next() else {
                break;
            };
            session.attempt_placement(row, col, slot).unwrap();
        }
        (session.score(), session.board().clone())
    }

    assert_eq!(play(seed()), play(seed()));
}
