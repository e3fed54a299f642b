//! # question-bank
//!
//! Quiz questions as plain values, with the operations for creating,
//! checking, formatting and deriving them, a JSON bank format, and a
//! terminal quiz runner.
//!
//! ## Usage
//!
//! ```rust
//! use question_bank::{Question, QuestionType};
//!
//! let question = Question::new(1, "Pets", QuestionType::MultipleChoice)
//!     .with_body("Pick one")
//!     .with_expected("Dog")
//!     .add_option("Cat")
//!     .add_option("Dog");
//!
//! assert!(question.is_valid("Dog"));
//! assert!(question.is_correct(" dog "));
//! assert_eq!(question.to_markdown(), "# Pets\nPick one\n- Cat\n- Dog");
//! ```
//!
//! Running a bank in the terminal:
//!
//! ```rust,no_run
//! use question_bank::{Quiz, QuizConfig, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::from_json("questions.json", &QuizConfig::default())?;
//!     quiz.run()?;
//!     Ok(())
//! }
//! ```

mod app;
pub mod cli;
mod data;
mod models;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::{App, QuizConfig};
pub use data::{
    DEFAULT_QUESTIONS_PATH, LoadError, find_question, load_questions_from_json, next_id,
    save_questions_to_json,
};
pub use models::{AppState, Question, QuestionType};

const DEFAULT_TITLE: &str = "Question Bank";

/// Error type for quiz operations.
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no question with id {id}")]
    NotFound { id: u64 },

    #[error("question id {id} is already taken")]
    IdTaken { id: u64 },

    #[error("no free question id left, pass one explicitly")]
    IdsExhausted,
}

/// A quiz session that can be run in the terminal.
pub struct Quiz {
    app: App,
    title: String,
}

impl Quiz {
    /// Create a quiz over the published questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self::with_config(questions, &QuizConfig::default())
    }

    pub fn with_config(questions: Vec<Question>, config: &QuizConfig) -> Self {
        Self {
            app: App::with_config(questions, config),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Load a quiz from a JSON bank file, titled after the file name. The
    /// bank must hold at least one question.
    pub fn from_json<P: AsRef<Path>>(path: P, config: &QuizConfig) -> Result<Self, QuizError> {
        let path = path.as_ref();
        let questions = load_questions_from_json(path)?;
        if questions.is_empty() {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            }
            .into());
        }
        let mut quiz = Self::with_config(questions, config);
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            quiz.title = stem.replace(['_', '-'], " ");
        }
        Ok(quiz)
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        tracing::debug!(questions = self.app.total_questions(), "starting quiz");
        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app, &self.title)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    title: &str,
) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app, title))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => match app.current_question().map(|question| question.kind) {
            Some(QuestionType::ShortAnswer) => handle_text_input(app, key),
            Some(QuestionType::MultipleChoice) => handle_choice_input(app, key),
            None => {
                app.submit_answer();
                false
            }
        },
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_choice_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.submit_answer();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

// Letters are answer text here, so only Esc quits.
fn handle_text_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(c) => {
            app.push_char(c);
            false
        }
        KeyCode::Backspace => {
            app.pop_char();
            false
        }
        KeyCode::Enter => {
            app.submit_answer();
            false
        }
        KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
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
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}
