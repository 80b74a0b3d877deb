//! TUI application state and logic

use crate::game::{
    Cell, Clock, GameEngine, GameEvent, GameStatus, HintAllocator, StreakTracker, SystemClock,
    hints_remaining,
};
use crate::output::{format_time, share_text};
use crate::storage::Store;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

/// How often the timer is redrawn while no key is pressed
const TICK: Duration = Duration::from_secs(1);

/// Messages kept on screen
const MAX_MESSAGES: usize = 6;

/// Application state
pub struct App<S: Store, C: Clock = SystemClock> {
    pub engine: GameEngine<S, C>,
    pub hints: HintAllocator<StdRng>,
    pub streak: StreakTracker<S>,
    pub cursor: Cell,
    pub mode: AppMode,
    pub messages: Vec<Message>,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Playing,
    ConfirmGiveUp,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<S: Store, C: Clock> App<S, C> {
    /// Wrap an opened game
    ///
    /// A game that was already finished in an earlier run is counted towards
    /// the streak here; counting is idempotent per puzzle.
    pub fn new(
        engine: GameEngine<S, C>,
        streak: StreakTracker<S>,
        hints: HintAllocator<StdRng>,
    ) -> Self {
        let mut app = Self {
            engine,
            hints,
            streak,
            cursor: Cell::new(0, 0),
            mode: AppMode::Playing,
            messages: Vec::new(),
            should_quit: false,
        };

        match app.engine.status() {
            GameStatus::InProgress => {
                app.add_message(
                    "Each answer starts with the first letters of the one above it.",
                    MessageStyle::Info,
                );
                app.add_message("Type to fill, ? for a hint, ! to give up.", MessageStyle::Info);
                app.jump_to_open_cell();
            }
            status => app.finish(status == GameStatus::GivenUp),
        }

        app
    }

    /// Dispatch one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.reset();
            return;
        }

        match self.mode {
            AppMode::ConfirmGiveUp => match key.code {
                KeyCode::Char('y' | 'Y') => self.give_up(),
                _ => {
                    self.mode = AppMode::Playing;
                    self.add_message("Keep going!", MessageStyle::Info);
                }
            },
            AppMode::Finished => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('s') => {
                    let text = self.share_text();
                    for line in text.lines().filter(|l| !l.is_empty()) {
                        self.add_message(line, MessageStyle::Info);
                    }
                }
                _ => {}
            },
            AppMode::Playing => match key.code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('?') => self.request_hint(),
                KeyCode::Char('!') => {
                    self.mode = AppMode::ConfirmGiveUp;
                    self.add_message("Give up and reveal every answer? (y/n)", MessageStyle::Error);
                }
                KeyCode::Char(c) if c.is_ascii_alphabetic() => self.type_letter(c),
                KeyCode::Backspace => self.backspace(),
                KeyCode::Delete => {
                    let events = self.engine.clear_letter(self.cursor.word, self.cursor.letter);
                    self.apply_events(&events);
                }
                KeyCode::Left => self.move_cursor(0, -1),
                KeyCode::Right => self.move_cursor(0, 1),
                KeyCode::Up => self.move_cursor(-1, 0),
                KeyCode::Down | KeyCode::Enter => self.move_cursor(1, 0),
                KeyCode::Tab => self.jump_to_open_cell(),
                _ => {}
            },
        }
    }

    pub fn type_letter(&mut self, c: char) {
        let Cell { word, letter } = self.cursor;
        let events = self.engine.set_letter(word, letter, c.encode_utf8(&mut [0; 4]));
        let solved_row = events.contains(&GameEvent::WordValidated(word));
        self.apply_events(&events);

        if self.mode != AppMode::Playing {
            return;
        }
        if solved_row {
            self.jump_to_open_cell();
        } else {
            self.move_cursor(0, 1);
        }
    }

    pub fn backspace(&mut self) {
        let Cell { word, letter } = self.cursor;
        if self.engine.matrix().cell(word, letter).is_none() && letter > 0 {
            self.cursor.letter -= 1;
        }
        let events = self.engine.clear_letter(self.cursor.word, self.cursor.letter);
        self.apply_events(&events);
    }

    pub fn move_cursor(&mut self, rows: isize, letters: isize) {
        let row_count = self.engine.puzzle().chain_length();
        let word = self
            .cursor
            .word
            .saturating_add_signed(rows)
            .min(row_count.saturating_sub(1));
        let width = self.engine.matrix().row(word).len();
        let letter = self
            .cursor
            .letter
            .saturating_add_signed(letters)
            .min(width.saturating_sub(1));
        self.cursor = Cell::new(word, letter);
    }

    /// Put the cursor on the first empty cell of an unsolved row, starting
    /// from the current row
    pub fn jump_to_open_cell(&mut self) {
        let matrix = self.engine.matrix();
        let validated = self.engine.validated();
        let rows = matrix.row_count();

        let open = (0..rows)
            .map(|offset| (self.cursor.word + offset) % rows)
            .filter(|&word| !validated.get(word).copied().unwrap_or(true))
            .find_map(|word| {
                matrix
                    .row(word)
                    .iter()
                    .position(Option::is_none)
                    .map(|letter| Cell::new(word, letter))
            });

        if let Some(cell) = open {
            self.cursor = cell;
        }
    }

    pub fn request_hint(&mut self) {
        let outcome = self.hints.apply(&mut self.engine);
        if !outcome.applied {
            let reason = if hints_remaining(&self.engine) == 0 {
                "No hints left."
            } else {
                "Nothing left to reveal."
            };
            self.add_message(reason, MessageStyle::Error);
            return;
        }

        let remaining = hints_remaining(&self.engine);
        let kind = if outcome.was_priority {
            "Cascade hint"
        } else {
            "Hint"
        };
        self.add_message(
            &format!("{kind} used ({remaining} left)"),
            MessageStyle::Info,
        );
        self.apply_events(&outcome.events);
        if self.mode == AppMode::Playing {
            self.jump_to_open_cell();
        }
    }

    pub fn give_up(&mut self) {
        let events = self.engine.give_up();
        self.apply_events(&events);
    }

    /// Start the puzzle over; the streak is unaffected
    pub fn reset(&mut self) {
        self.engine.reset();
        self.mode = AppMode::Playing;
        self.cursor = Cell::new(0, 0);
        self.messages.clear();
        self.add_message("New session started.", MessageStyle::Info);
    }

    fn apply_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::WordValidated(word) => {
                    self.add_message(&format!("Word {} solved!", word + 1), MessageStyle::Success);
                }
                GameEvent::Completed { given_up } => self.finish(given_up),
                GameEvent::WordInvalidated(_) | GameEvent::AutoFilled(_) => {}
            }
        }
    }

    fn finish(&mut self, given_up: bool) {
        self.mode = AppMode::Finished;
        self.streak
            .record_completion(self.engine.puzzle().id(), given_up);

        if given_up {
            self.add_message("Answers revealed. Streak reset.", MessageStyle::Error);
        } else {
            self.add_message(
                &format!("🎉 Solved in {}!", format_time(self.engine.elapsed())),
                MessageStyle::Success,
            );
        }
        self.add_message(
            &format!(
                "Streak: {} (best {})",
                self.streak.current(),
                self.streak.best()
            ),
            MessageStyle::Info,
        );
        self.add_message("Press 's' to share, 'q' to quit.", MessageStyle::Info);
    }

    #[must_use]
    pub fn share_text(&self) -> String {
        let completion = (self.engine.status() == GameStatus::Solved).then(|| self.engine.elapsed());
        share_text(completion, self.streak.current(), self.streak.best())
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: Store, C: Clock>(app: App<S, C>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, S: Store, C: Clock>(
    terminal: &mut Terminal<B>,
    mut app: App<S, C>,
) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        // Redraw at least once per tick so the timer keeps moving
        if !event::poll(TICK)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PuzzleBook;
    use crate::game::ManualClock;
    use crate::storage::MemoryStore;
    use rand::SeedableRng;

    fn app() -> App<MemoryStore, ManualClock> {
        let puzzle = PuzzleBook::embedded().unwrap().puzzles()[0].clone();
        let engine = GameEngine::new(puzzle, MemoryStore::new(), ManualClock::new(0));
        App::new(
            engine,
            StreakTracker::load(MemoryStore::new()),
            HintAllocator::new(StdRng::seed_from_u64(1)),
        )
    }

    fn press(app: &mut App<MemoryStore, ManualClock>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App<MemoryStore, ManualClock>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_advances_cursor() {
        let mut app = app();
        type_text(&mut app, "bic");
        assert_eq!(app.cursor, Cell::new(0, 3));
        assert_eq!(app.engine.matrix().row_text(0), "BIC");
    }

    #[test]
    fn solving_a_row_jumps_to_next_open_cell() {
        let mut app = app();
        type_text(&mut app, "bicker");
        // Column 0 of row 1 was auto-filled
        assert_eq!(app.cursor, Cell::new(1, 1));
    }

    #[test]
    fn backspace_clears_previous_cell() {
        let mut app = app();
        type_text(&mut app, "bi");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.cursor, Cell::new(0, 1));
        assert_eq!(app.engine.matrix().row_text(0), "B");
    }

    #[test]
    fn give_up_requires_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('!'));
        assert_eq!(app.mode, AppMode::ConfirmGiveUp);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, AppMode::Playing);
        assert_eq!(app.engine.status(), GameStatus::InProgress);

        press(&mut app, KeyCode::Char('!'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.mode, AppMode::Finished);
        assert_eq!(app.engine.status(), GameStatus::GivenUp);
        assert_eq!(app.streak.current(), 0);
        assert!(app.share_text().contains("Not completed"));
    }

    #[test]
    fn solving_updates_streak_once() {
        let mut app = app();
        let answers: Vec<String> = app
            .engine
            .puzzle()
            .answers()
            .into_iter()
            .map(String::from)
            .collect();
        for (row, answer) in answers.iter().enumerate() {
            app.cursor = Cell::new(row, 0);
            type_text(&mut app, answer);
        }
        assert_eq!(app.mode, AppMode::Finished);
        assert_eq!(app.streak.current(), 1);

        // Reopening the finished game does not count it again
        let App { engine, streak, .. } = app;
        let reopened = App::new(
            GameEngine::new(engine.puzzle().clone(), engine.into_store(), ManualClock::new(0)),
            streak,
            HintAllocator::new(StdRng::seed_from_u64(2)),
        );
        assert_eq!(reopened.mode, AppMode::Finished);
        assert_eq!(reopened.streak.current(), 1);
    }

    #[test]
    fn hint_key_spends_budget() {
        let mut app = app();
        for _ in 0..4 {
            press(&mut app, KeyCode::Char('?'));
        }
        assert_eq!(hints_remaining(&app.engine), 0);
        assert_eq!(app.messages.last().unwrap().text, "No hints left.");
    }

    #[test]
    fn cursor_stays_in_grid() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor, Cell::new(0, 0));
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.cursor, Cell::new(4, 8));
    }
}
