use std::path::PathBuf;

use blockfit_engine::{GameSession, GameStats, PieceSeed};
use rand::Rng as _;
use serde::Serialize;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Maximum number of placements per game
    #[arg(long, default_value_t = 1000)]
    max_turns: usize,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct AutoPlaySummary {
    seed: PieceSeed,
    best_score: usize,
    mean_score: f64,
    games: Vec<GameSummary>,
}

#[derive(Debug, Clone, Serialize)]
struct GameSummary {
    score: usize,
    level: usize,
    turns: usize,
    lines: usize,
    is_game_over: bool,
    stats: GameStats,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        seed,
        games,
        max_turns,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("auto-play: {games} games with seed {seed}");

    let mut session = GameSession::with_seed(0, seed);
    let mut summaries = Vec::with_capacity(*games);
    for game in 0..*games {
        if game > 0 {
            session.restart();
        }
        let summary = play_game(&mut session, *max_turns);
        log::info!(
            "game {game}: score {} level {} after {} turns",
            summary.score,
            summary.level,
            summary.turns
        );
        summaries.push(summary);
    }

    let summary = AutoPlaySummary {
        seed,
        best_score: summaries.iter().map(|game| game.score).max().unwrap_or(0),
        mean_score: mean(summaries.iter().map(|game| game.score)),
        games: summaries,
    };
    Output::new(output.as_deref())?.write_json(&summary)
}

fn play_game(session: &mut GameSession, max_turns: usize) -> GameSummary {
    let mut turns = 0;
    while turns < max_turns && session.state().is_awaiting_input() {
        let Some((slot, row, col)) = choose_placement(session) else {
            break;
        };
        if let Err(e) = session.attempt_placement(row, col, slot) {
            log::warn!("rejected placement of slot {slot} at ({row}, {col}): {e}");
            break;
        }
        turns += 1;
    }
    GameSummary {
        score: session.score(),
        level: session.level(),
        turns,
        lines: session.stats().total_cleared_lines(),
        is_game_over: session.state().is_game_over(),
        stats: session.stats().clone(),
    }
}

/// Picks the placement that clears the most lines; ties go to the first one
/// found.
fn choose_placement(session: &GameSession) -> Option<(usize, isize, isize)> {
    let mut best: Option<((usize, isize, isize), usize)> = None;
    for (slot, row, col) in session.valid_placements() {
        let mut trial = session.clone();
        let Ok(outcome) = trial.attempt_placement(row, col, slot) else {
            continue;
        };
        let lines = outcome.lines_cleared();
        if best.is_none_or(|(_, best_lines)| lines > best_lines) {
            best = Some(((slot, row, col), lines));
        }
    }
    best.map(|(placement, _)| placement)
}

#[expect(clippy::cast_precision_loss)]
fn mean(values: impl ExactSizeIterator<Item = usize>) -> f64 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    values.sum::<usize>() as f64 / len as f64
}
