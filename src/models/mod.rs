mod question;

pub use question::{Question, QuestionType};

/// Which screen the quiz runner is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
