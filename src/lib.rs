//! # verb-drill
//!
//! A terminal drill for English verb forms, phrasal verbs, connectors and
//! frequency-list words with Spanish glosses.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use verb_drill::{Drill, DrillError};
//! use verb_drill::data::Source;
//!
//! # async fn demo() -> Result<(), DrillError> {
//! let drill = Drill::load(&Source::File("verbs.json".into())).await?;
//! drill.run().await?;
//! # Ok(())
//! # }
//! ```

mod app;
pub mod config;
pub mod data;
pub mod models;
pub mod session;
pub mod speech;
pub mod terminal;
mod ui;

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;
use tracing::{info, warn};

pub use app::{App, Feedback};
pub use config::{Cli, Config};
pub use data::{Choice, LoadError, Source};
pub use models::{AppState, Direction, Field, Item, ItemSet, Shape};
pub use session::{EmptyAnswerPolicy, Grade, Session};

use speech::SilentSpeaker;

/// Error type for drill operations.
#[derive(Debug, Error)]
pub enum DrillError {
    /// Error loading the item set.
    #[error("Failed to load items: {0}")]
    Load(#[from] LoadError),

    /// IO error while driving the terminal.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A drill ready to run in the terminal.
pub struct Drill {
    app: App,
    seed: Option<u64>,
}

impl Drill {
    /// Wrap an already configured app.
    ///
    /// Item sets switched to from the welcome screen get random directions.
    pub fn new(app: App) -> Self {
        Self { app, seed: None }
    }

    /// Load a source with default settings: random directions, strict
    /// empty answers and no speech.
    ///
    /// # Arguments
    ///
    /// * `source` - Where to read the items from.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use verb_drill::{Drill, Source};
    ///
    /// # async fn demo() -> Result<(), verb_drill::DrillError> {
    /// let drill = Drill::load(&Source::Url("https://example.com/verbs.json".into())).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(source: &Source) -> Result<Self, DrillError> {
        let loaded = source.load().await?;
        let session = Session::with_seed(loaded.items, None, EmptyAnswerPolicy::default());
        let app = App::new(session, Box::new(SilentSpeaker), loaded.label)
            .with_choices(choices_for(source).await);
        Ok(Self::new(app))
    }

    /// Load the configured source and set up speech, seed and grading
    /// policy from the command line.
    ///
    /// # Arguments
    ///
    /// * `config` - Settings built by [`Cli::into_config`].
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use clap::Parser;
    /// use verb_drill::{Cli, Drill};
    ///
    /// # async fn demo() -> Result<(), verb_drill::DrillError> {
    /// let config = Cli::parse().into_config();
    /// let drill = Drill::from_config(&config).await?;
    /// drill.run().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn from_config(config: &Config) -> Result<Self, DrillError> {
        let loaded = config.source.load().await?;
        info!(label = %loaded.label, items = loaded.items.len(), "items loaded");

        let session = Session::with_seed(loaded.items, config.seed, config.policy);
        let app = App::new(session, config.speaker(), loaded.label)
            .with_auto_speak(config.auto_speak)
            .with_choices(choices_for(&config.source).await);
        Ok(Self {
            app,
            seed: config.seed,
        })
    }

    /// Run the drill in the terminal.
    ///
    /// This takes over the terminal, displays the drill UI, and returns
    /// when the user quits. Item sets picked on the welcome screen are
    /// loaded in between key presses.
    pub async fn run(mut self) -> Result<(), DrillError> {
        let mut term = terminal::init()?;
        let result = self.event_loop(&mut term).await;
        terminal::restore()?;
        result
    }

    /// Replace the items with another item set. On failure the current
    /// session is kept and the error is shown on the welcome screen.
    pub async fn switch_to(&mut self, choice: &Choice) {
        match choice.load().await {
            Ok(loaded) => {
                info!(label = %loaded.label, items = loaded.items.len(), "switched item set");
                let policy = self.app.session().policy();
                let session = Session::with_seed(loaded.items, self.seed, policy);
                self.app.replace_session(session, loaded.label);
            }
            Err(e) => {
                warn!(label = %choice.label, error = %e, "could not switch item set");
                self.app
                    .set_status(format!("Could not load {}: {}", choice.label, e));
            }
        }
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    async fn event_loop(&mut self, terminal: &mut terminal::DrillTerminal) -> Result<(), DrillError> {
        loop {
            terminal.draw(|frame| ui::render(frame, &self.app))?;

            if let Some(choice) = self.app.take_pending_load() {
                self.switch_to(&choice).await;
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(&mut self.app, key) {
                    break;
                }
            }
        }

        info!(score = self.app.score(), total = self.app.total_items(), "drill closed");
        Ok(())
    }
}

/// Item sets to offer on the welcome screen. A listing failure only costs
/// the picker.
async fn choices_for(source: &Source) -> Vec<Choice> {
    source.choices().await.unwrap_or_else(|e| {
        warn!(error = %e, "could not list other item sets");
        Vec::new()
    })
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz if app.goto_input().is_some() => handle_goto_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.start_quiz(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_choice(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_choice(),
        KeyCode::Char('l') | KeyCode::Char('L') => app.request_selected_choice(),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_goto_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => app.goto_push(c),
        KeyCode::Backspace => app.goto_pop(),
        KeyCode::Enter => app.commit_goto(),
        KeyCode::Esc => app.cancel_goto(),
        _ => {}
    }
    false
}

fn handle_quiz_input(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('n') | KeyCode::Enter => app.next(),
            KeyCode::Char('p') => app.previous(),
            KeyCode::Char('g') => app.begin_goto(),
            KeyCode::Char('s') => app.speak_prompt(),
            KeyCode::Char('a') => app.speak_focused_field(),
            KeyCode::Char('o') => app.open_menu(),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Enter => app.check_answer(),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
        KeyCode::PageDown => app.next(),
        KeyCode::PageUp => app.previous(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            app.open_menu();
            false
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::verbs_app;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press_ctrl(app: &mut App, c: char) -> bool {
        handle_input(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_welcome_keys() {
        let (mut app, _) = verbs_app(1);

        assert!(!press(&mut app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Quiz);
    }

    #[test]
    fn test_typing_q_in_quiz_does_not_quit() {
        let (mut app, _) = verbs_app(1);
        press(&mut app, KeyCode::Enter);
        let field = app.focused_field().unwrap();

        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.input(field), "q");
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_quiz_navigation_keys() {
        let (mut app, _) = verbs_app(1);
        press(&mut app, KeyCode::Enter);

        press_ctrl(&mut app, 'n');
        assert_eq!(app.current_index(), Some(1));
        press_ctrl(&mut app, 'p');
        assert_eq!(app.current_index(), Some(0));

        press_ctrl(&mut app, 'g');
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_index(), Some(1));

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.state, AppState::Result);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.current_index(), Some(0));
    }

    #[test]
    fn test_enter_checks_answer() {
        let (mut app, _) = verbs_app(1);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.feedback(), Some(&Feedback::Incorrect));
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let (mut app, _) = verbs_app(1);
        assert!(press_ctrl(&mut app, 'c'));
        press(&mut app, KeyCode::Enter);
        assert!(press_ctrl(&mut app, 'c'));
    }

    #[test]
    fn test_welcome_picker_keys() {
        let (app, _) = verbs_app(1);
        let choices = ["a.json", "b.json"].map(|name| Choice {
            label: name.to_string(),
            source: Source::File(name.into()),
        });
        let mut app = app.with_choices(choices.to_vec());

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_choice(), 1);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected_choice(), 0);

        assert!(!press(&mut app, KeyCode::Char('l')));
        assert_eq!(app.take_pending_load().map(|choice| choice.label), Some("a.json".to_string()));
        assert_eq!(app.state, AppState::Welcome);
    }

    #[test]
    fn test_menu_keys() {
        let (mut app, _) = verbs_app(1);
        press(&mut app, KeyCode::Enter);
        press_ctrl(&mut app, 'o');
        assert_eq!(app.state, AppState::Welcome);

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.state, AppState::Result);
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.state, AppState::Welcome);
    }

    #[tokio::test]
    async fn test_switch_to_loads_new_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connectors.json");
        std::fs::write(&path, r#"{"connectors": [{"connector": "however", "meaning_es": "sin embargo"}]}"#).unwrap();

        let (mut app, _) = verbs_app(1);
        app.start_quiz();
        let mut drill = Drill::new(app);

        let choice = Choice {
            label: "connectors.json".to_string(),
            source: Source::File(path),
        };
        drill.switch_to(&choice).await;

        assert_eq!(drill.app().state, AppState::Welcome);
        assert_eq!(drill.app().source_label(), "connectors.json");
        assert_eq!(drill.app().shape(), Shape::Connector);
        assert_eq!(drill.app().total_items(), 1);
    }

    #[tokio::test]
    async fn test_failed_switch_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = verbs_app(1);
        let mut drill = Drill::new(app);

        let choice = Choice {
            label: "missing.json".to_string(),
            source: Source::File(dir.path().join("missing.json")),
        };
        drill.switch_to(&choice).await;

        assert_eq!(drill.app().source_label(), "test.json");
        assert_eq!(drill.app().total_items(), 2);
        assert!(drill.app().status().unwrap().starts_with("Could not load missing.json"));
    }
}
