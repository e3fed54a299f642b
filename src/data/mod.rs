mod loader;

pub use loader::{
    DEFAULT_QUESTIONS_PATH, LoadError, find_question, load_questions_from_json, next_id,
    save_questions_to_json,
};
