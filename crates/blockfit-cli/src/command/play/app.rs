use blockfit_engine::{BOARD_SIZE, GameEvent, GameSession, Rotation, TRAY_SIZE};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};

use crate::{
    high_score::HighScoreStore,
    ui::widgets::{KeyBindingDisplay, SessionDisplay, StatusLine},
};

const PLAYING_BINDINGS: &[(&[&str], &str)] = &[
    (&["1", "2", "3"], "Select"),
    (&["←", "→", "↑", "↓"], "Move"),
    (&["Z", "X"], "Rotate"),
    (&["Enter", "Space"], "Place"),
    (&["R"], "Restart"),
    (&["Q"], "Quit"),
];

const GAME_OVER_BINDINGS: &[(&[&str], &str)] = &[(&["R"], "Restart"), (&["Q"], "Quit")];

#[derive(Debug)]
pub struct App {
    session: GameSession,
    store: HighScoreStore,
    cursor: (isize, isize),
    selected: usize,
    status: Option<String>,
    is_exiting: bool,
}

impl App {
    pub fn new(session: GameSession, store: HighScoreStore) -> Self {
        Self {
            session,
            store,
            cursor: (0, 0),
            selected: 0,
            status: None,
            is_exiting: false,
        }
    }

    pub(crate) fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.is_exiting {
            terminal.draw(|f| self.draw(f))?;
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key(key_event.code);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let (row, col) = self.cursor;
        let session_display = SessionDisplay::new(&self.session).cursor(self.selected, row, col);
        let bindings = if self.session.state().is_game_over() {
            GAME_OVER_BINDINGS
        } else {
            PLAYING_BINDINGS
        };

        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(StatusLine::new(self.status.as_deref()), status_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn handle_key(&mut self, code: KeyCode) {
        let is_playing = self.session.state().is_awaiting_input();
        match code {
            KeyCode::Char(c @ '1'..='3') if is_playing => {
                self.select(c as usize - '1' as usize);
            }
            KeyCode::Left if is_playing => self.move_cursor(0, -1),
            KeyCode::Right if is_playing => self.move_cursor(0, 1),
            KeyCode::Up if is_playing => self.move_cursor(-1, 0),
            KeyCode::Down if is_playing => self.move_cursor(1, 0),
            KeyCode::Char('z') if is_playing => self.rotate(Rotation::CounterClockwise),
            KeyCode::Char('x') if is_playing => self.rotate(Rotation::Clockwise),
            KeyCode::Enter | KeyCode::Char(' ') if is_playing => self.place(),
            KeyCode::Char('r') => {
                let events = self.session.restart();
                self.cursor = (0, 0);
                self.selected = 0;
                self.status = None;
                self.apply_events(&events);
            }
            KeyCode::Char('q') => self.is_exiting = true,
            _ => {}
        }
    }

    fn select(&mut self, slot: usize) {
        match self.session.tray().slot(slot) {
            Ok(_) => {
                self.selected = slot;
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        #[expect(clippy::cast_possible_wrap)]
        let max = BOARD_SIZE as isize - 1;
        let (row, col) = self.cursor;
        self.cursor = ((row + d_row).clamp(0, max), (col + d_col).clamp(0, max));
    }

    fn rotate(&mut self, rotation: Rotation) {
        match self.session.rotate_tray(rotation) {
            Ok(events) => self.apply_events(&events),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn place(&mut self) {
        let (row, col) = self.cursor;
        match self.session.attempt_placement(row, col, self.selected) {
            Ok(outcome) => {
                self.status = (outcome.lines_cleared() > 0).then(|| {
                    format!(
                        "{} lines for {} points",
                        outcome.lines_cleared(),
                        outcome.points()
                    )
                });
                self.apply_events(outcome.events());
                self.select_next_unused();
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Moves the selection to the first unused slot at or after the current
    /// one, wrapping around.
    fn select_next_unused(&mut self) {
        if let Some(slot) = (0..TRAY_SIZE)
            .map(|offset| (self.selected + offset) % TRAY_SIZE)
            .find(|slot| self.session.tray().slot(*slot).is_ok())
        {
            self.selected = slot;
        }
    }

    fn apply_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::NewHighScore { score } => {
                    if let Err(e) = self.store.save(*score) {
                        log::warn!("{e:#}");
                        self.status = Some(format!("could not save high score: {e}"));
                    }
                }
                GameEvent::GameOver { final_score } => {
                    log::info!("game over with score {final_score}");
                }
                GameEvent::LevelChanged { level } => log::debug!("level {level}"),
                _ => {}
            }
        }
    }
}
