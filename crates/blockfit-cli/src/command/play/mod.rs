use std::path::PathBuf;

use blockfit_engine::{GameSession, PieceSeed};

use crate::{command::play::app::App, high_score::HighScoreStore};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// File the best score is loaded from and saved to
    #[arg(long, default_value = "./data/high_score.json")]
    high_score_file: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            high_score_file: PathBuf::from("./data/high_score.json"),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        high_score_file,
    } = arg;

    let store = HighScoreStore::new(high_score_file);
    let high_score = store.load()?;
    log::info!(
        "loaded high score {high_score} from {}",
        store.path().display()
    );

    let session = match seed {
        Some(seed) => GameSession::with_seed(high_score, *seed),
        None => GameSession::new(high_score),
    };
    let mut app = App::new(session, store);

    ratatui::run(|terminal| app.run(terminal))?;
    Ok(())
}
