//! Property tests for the placement, rotation, clearing and scoring rules.
//!
//! Boards are generated from a 64-bit occupancy mask, one bit per cell in
//! row-major order.

use blockfit_engine::{
    BOARD_SIZE, BlockColor, Board, CellSet, GameSession, LEVEL_SCORE_STEP, Piece, PieceSeed,
    PieceShape, Progression, Rotation, ShapePool, combo_points, is_valid_placement,
};
use proptest::prelude::*;

fn board_from_mask(mask: u64) -> Board {
    let mut board = Board::EMPTY;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if mask & (1 << (row * BOARD_SIZE + col)) != 0 {
                board.fill(row, col, BlockColor::Green).unwrap();
            }
        }
    }
    board
}

fn cells_from_mask(mask: u64) -> CellSet {
    let mut cells = CellSet::EMPTY;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if mask & (1 << (row * BOARD_SIZE + col)) != 0 {
                cells.insert(row, col).unwrap();
            }
        }
    }
    cells
}

fn all_shapes() -> Vec<PieceShape> {
    ShapePool::ALL
        .iter()
        .flat_map(|pool| pool.shapes().iter().copied())
        .collect()
}

fn shape_strategy() -> impl Strategy<Value = PieceShape> {
    (proptest::sample::select(all_shapes()), 0..4usize).prop_map(|(shape, turns)| {
        (0..turns).fold(shape, |shape, _| shape.rotated(Rotation::Clockwise))
    })
}

/// Checks the placement cell by cell in wide integers.
fn brute_force_fits(
    board: &Board,
    anchor_row: isize,
    anchor_col: isize,
    shape: &PieceShape,
) -> bool {
    let size = i128::try_from(BOARD_SIZE).unwrap();
    shape.occupied_cells().all(|(dr, dc)| {
        let row = i128::try_from(anchor_row).unwrap() + i128::try_from(dr).unwrap();
        let col = i128::try_from(anchor_col).unwrap() + i128::try_from(dc).unwrap();
        (0..size).contains(&row)
            && (0..size).contains(&col)
            && board.is_occupied(usize::try_from(row).unwrap(), usize::try_from(col).unwrap())
                == Ok(false)
    })
}

#[test]
fn four_quarter_turns_restore_every_pool_shape() {
    for shape in all_shapes() {
        for rotation in [Rotation::Clockwise, Rotation::CounterClockwise] {
            let turned = (0..4).fold(shape, |shape, _| shape.rotated(rotation));
            assert_eq!(turned, shape, "{shape} {rotation:?}");
        }
        assert_eq!(
            shape.rotated(Rotation::Clockwise).rotated(Rotation::CounterClockwise),
            shape
        );
    }
}

proptest! {
    #[test]
    fn validator_agrees_with_brute_force(
        mask in any::<u64>(),
        shape in shape_strategy(),
        anchor_row in -6isize..12,
        anchor_col in -6isize..12,
    ) {
        let board = board_from_mask(mask);
        let piece = Piece::new(shape, BlockColor::Red);
        prop_assert_eq!(
            is_valid_placement(&board, anchor_row, anchor_col, Some(&piece)),
            brute_force_fits(&board, anchor_row, anchor_col, &shape)
        );
    }

    #[test]
    fn validator_rejects_extreme_anchors(
        mask in any::<u64>(),
        shape in shape_strategy(),
        anchor_row in prop_oneof![Just(isize::MIN), Just(isize::MAX), any::<isize>()],
        anchor_col in prop_oneof![Just(isize::MIN), Just(isize::MAX), any::<isize>()],
    ) {
        let board = board_from_mask(mask);
        let piece = Piece::new(shape, BlockColor::Red);
        let in_range = |a: isize| (0..8).contains(&a);
        if !in_range(anchor_row) || !in_range(anchor_col) {
            prop_assert!(!is_valid_placement(&board, anchor_row, anchor_col, Some(&piece)));
        }
    }

    #[test]
    fn clear_cells_is_idempotent(board_mask in any::<u64>(), clear_mask in any::<u64>()) {
        let cells = cells_from_mask(clear_mask);
        let mut once = board_from_mask(board_mask);
        once.clear_cells(&cells);
        let mut twice = once.clone();
        let emptied = twice.clear_cells(&cells);

        prop_assert_eq!(&once, &twice);
        prop_assert!(emptied.is_empty());
        for (row, col) in cells.iter() {
            prop_assert_eq!(once.is_occupied(row, col), Ok(false));
        }
    }

    #[test]
    fn score_and_level_only_grow(line_counts in proptest::collection::vec(0..=16usize, 0..60)) {
        let mut progression = Progression::default();
        for lines in line_counts {
            let before = progression;
            progression.update_score(combo_points(lines));
            prop_assert!(progression.score() >= before.score());
            prop_assert!(progression.level() >= before.level());
            prop_assert!(progression.score() >= (progression.level() - 1) * LEVEL_SCORE_STEP);
            prop_assert!(progression.score() < progression.level() * LEVEL_SCORE_STEP);
        }
    }

    #[test]
    fn random_play_keeps_rules(
        seed in any::<[u8; 16]>(),
        choices in proptest::collection::vec(any::<usize>(), 1..120)
    ) {
        let mut session = GameSession::with_seed(0, PieceSeed::from_bytes(seed));
        for choice in choices {
            if session.state().is_game_over() {
                prop_assert!(!session.has_any_fit());
                break;
            }
            let moves: Vec<_> = session.valid_placements().collect();
            prop_assert!(!moves.is_empty());
            let (slot, row, col) = moves[choice % moves.len()];
            let score = session.score();
            let level = session.level();

            let outcome = session.attempt_placement(row, col, slot).unwrap();

            prop_assert_eq!(session.score(), score + outcome.points());
            prop_assert!(session.level() >= level);
            prop_assert!(session.board().full_rows().is_empty());
            prop_assert!(session.board().full_columns().is_empty());
            prop_assert!(session.tray().unused_pieces().count() > 0);
            prop_assert!(outcome.events().iter().filter(|event| event.is_game_over()).count() <= 1);
        }
    }
}
