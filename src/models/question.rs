use serde::{Deserialize, Serialize};

const SHORT_FORM_NAME_LENGTH: usize = 10;
const COPY_PREFIX: &str = "Copy of ";

/// The kind of a question, which decides how answers are validated and how
/// the question is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "short_answer_question")]
    ShortAnswer,
    #[serde(rename = "multiple_choice_question")]
    MultipleChoice,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::ShortAnswer => "short_answer_question",
            QuestionType::MultipleChoice => "multiple_choice_question",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single quiz question.
///
/// Questions are plain values: every update method borrows `self` and
/// returns a fresh copy, leaving the original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub expected: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(default)]
    pub published: bool,
}

fn default_points() -> u32 {
    1
}

impl Question {
    /// Create a blank, unpublished question worth one point.
    pub fn new(id: u64, name: impl Into<String>, kind: QuestionType) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            body: String::new(),
            expected: String::new(),
            options: Vec::new(),
            points: default_points(),
            published: false,
        }
    }

    /// Build a new question that takes its content (type, body, expected
    /// answer and options) from `content`. The result is never published.
    pub fn merge(id: u64, name: impl Into<String>, content: &Question, points: u32) -> Self {
        Self {
            id,
            name: name.into(),
            kind: content.kind,
            body: content.body.clone(),
            expected: content.expected.clone(),
            options: content.options.clone(),
            points,
            published: false,
        }
    }

    /// Whether `answer` matches the expected answer, ignoring case and
    /// surrounding whitespace.
    pub fn is_correct(&self, answer: &str) -> bool {
        normalize(&self.expected) == normalize(answer)
    }

    /// Whether `answer` is an acceptable response, correct or not.
    ///
    /// Any text answers a short-answer question. A multiple-choice answer
    /// must be one of the options exactly as written.
    pub fn is_valid(&self, answer: &str) -> bool {
        match self.kind {
            QuestionType::ShortAnswer => true,
            QuestionType::MultipleChoice => self.options.iter().any(|option| option == answer),
        }
    }

    pub fn to_short_form(&self) -> String {
        let name: String = self.name.chars().take(SHORT_FORM_NAME_LENGTH).collect();
        format!("{}: {}", self.id, name)
    }

    pub fn to_markdown(&self) -> String {
        let mut markdown = format!("# {}\n{}", self.name, self.body);
        if self.kind == QuestionType::MultipleChoice {
            for option in &self.options {
                markdown.push_str("\n- ");
                markdown.push_str(option);
            }
        }
        markdown
    }

    pub fn rename(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Toggle the published flag.
    pub fn publish(&self) -> Self {
        Self {
            published: !self.published,
            ..self.clone()
        }
    }

    /// Copy this question under a new id. The copy is named "Copy of ..."
    /// and starts unpublished.
    pub fn duplicate(&self, id: u64) -> Self {
        Self {
            id,
            name: format!("{}{}", COPY_PREFIX, self.name),
            published: false,
            ..self.clone()
        }
    }

    pub fn add_option(&self, option: impl Into<String>) -> Self {
        let mut options = self.options.clone();
        options.push(option.into());
        Self {
            options,
            ..self.clone()
        }
    }

    pub fn with_body(&self, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..self.clone()
        }
    }

    pub fn with_expected(&self, expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            ..self.clone()
        }
    }

    pub fn with_points(&self, points: u32) -> Self {
        Self {
            points,
            ..self.clone()
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pets() -> Question {
        Question::new(3, "Pets", QuestionType::MultipleChoice)
            .with_body("Pick one")
            .with_expected("Dog")
            .add_option("Cat")
            .add_option("Dog")
    }

    #[test]
    fn test_new_uses_blank_defaults() {
        for kind in [QuestionType::ShortAnswer, QuestionType::MultipleChoice] {
            let question = Question::new(7, "Blank", kind);
            assert_eq!(question.id, 7);
            assert_eq!(question.name, "Blank");
            assert_eq!(question.kind, kind);
            assert_eq!(question.body, "");
            assert_eq!(question.expected, "");
            assert!(question.options.is_empty());
            assert_eq!(question.points, 1);
            assert!(!question.published);
        }
    }

    #[test]
    fn test_is_correct_ignores_case_and_whitespace() {
        let question = Question::new(1, "Q", QuestionType::ShortAnswer).with_expected("Foo");
        assert!(question.is_correct("foo"));
        assert!(question.is_correct(" Foo "));
        assert!(question.is_correct("\tFOO\n"));
        assert!(!question.is_correct("fo o"));
        assert!(!question.is_correct(""));

        let padded = Question::new(2, "Q", QuestionType::ShortAnswer).with_expected("  Bar ");
        assert!(padded.is_correct("bar"));

        let umlaut = Question::new(3, "Q", QuestionType::ShortAnswer).with_expected("Ärger");
        assert!(umlaut.is_correct(" ärger "));
        assert!(umlaut.is_correct("ÄRGER"));
        assert!(!umlaut.is_correct("arger"));
    }

    #[test]
    fn test_is_valid_short_answer_accepts_anything() {
        let question = Question::new(1, "Q", QuestionType::ShortAnswer);
        assert!(question.is_valid(""));
        assert!(question.is_valid("anything at all"));
    }

    #[test]
    fn test_is_valid_multiple_choice_requires_exact_option() {
        let question = Question::new(1, "Q", QuestionType::MultipleChoice)
            .add_option("A")
            .add_option("B");
        assert!(question.is_valid("A"));
        assert!(question.is_valid("B"));
        assert!(!question.is_valid("a"));
        assert!(!question.is_valid(" A"));
        assert!(!question.is_valid("C"));
        assert!(!question.is_valid(""));
    }

    #[test]
    fn test_short_form() {
        let question = Question::new(1, "Introduction to CS", QuestionType::ShortAnswer);
        assert_eq!(question.to_short_form(), "1: Introductio");

        let short = Question::new(42, "Tiny", QuestionType::ShortAnswer);
        assert_eq!(short.to_short_form(), "42: Tiny");

        let exact = Question::new(5, "0123456789", QuestionType::ShortAnswer);
        assert_eq!(exact.to_short_form(), "5: 0123456789");

        // counts characters, not bytes
        let accented = Question::new(9, "Révolution française", QuestionType::ShortAnswer);
        assert_eq!(accented.to_short_form(), "9: Révolution");
    }

    #[test]
    fn test_markdown_lists_options_for_multiple_choice() {
        assert_eq!(pets().to_markdown(), "# Pets\nPick one\n- Cat\n- Dog");
    }

    #[test]
    fn test_markdown_omits_options_for_short_answer() {
        let question = Question::new(1, "Capital", QuestionType::ShortAnswer)
            .with_body("What is the capital of France?")
            .add_option("ignored");
        assert_eq!(question.to_markdown(), "# Capital\nWhat is the capital of France?");

        let empty = Question::new(2, "Empty", QuestionType::MultipleChoice);
        assert_eq!(empty.to_markdown(), "# Empty\n");
    }

    #[test]
    fn test_rename_changes_only_name() {
        let original = pets();
        let renamed = original.rename("Animals");
        assert_eq!(renamed.name, "Animals");
        assert_eq!(renamed, Question { name: "Animals".to_string(), ..original.clone() });
        assert_eq!(original, pets());
    }

    #[test]
    fn test_publish_toggles() {
        let original = pets();
        let published = original.publish();
        assert!(published.published);
        assert!(!published.publish().published);
        assert!(!original.published);
    }

    #[test]
    fn test_duplicate_is_unpublished_copy() {
        let original = pets().publish().with_points(4);
        let copy = original.duplicate(5);
        assert_eq!(copy.id, 5);
        assert_eq!(copy.name, "Copy of Pets");
        assert!(!copy.published);
        assert_eq!(copy.kind, original.kind);
        assert_eq!(copy.body, original.body);
        assert_eq!(copy.expected, original.expected);
        assert_eq!(copy.options, original.options);
        assert_eq!(copy.points, 4);
        assert!(original.published);
        assert_eq!(original.name, "Pets");
    }

    #[test]
    fn test_add_option_appends_in_order() {
        let original = Question::new(1, "Q", QuestionType::MultipleChoice).add_option("X");
        let extended = original.add_option("Y");
        assert_eq!(extended.options, vec!["X", "Y"]);
        assert_eq!(original.options, vec!["X"]);
    }

    #[test]
    fn test_merge_takes_content_from_source() {
        let content = pets().publish().with_points(10);
        let merged = Question::merge(20, "Merged", &content, 3);
        assert_eq!(
            merged,
            Question {
                id: 20,
                name: "Merged".to_string(),
                kind: QuestionType::MultipleChoice,
                body: "Pick one".to_string(),
                expected: "Dog".to_string(),
                options: vec!["Cat".to_string(), "Dog".to_string()],
                points: 3,
                published: false,
            }
        );
        assert_eq!(content.id, 3);
        assert!(content.published);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let json = r#"{"id": 4, "name": "Sparse", "type": "short_answer_question"}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question, Question::new(4, "Sparse", QuestionType::ShortAnswer));
    }

    #[test]
    fn test_deserialize_rejects_unknown_type() {
        let json = r#"{"id": 4, "name": "Odd", "type": "essay_question"}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn test_serialize_uses_type_key() {
        let json = serde_json::to_string(&pets()).unwrap();
        assert!(json.contains("\"type\":\"multiple_choice_question\""));
        assert!(!json.contains("\"kind\""));
    }
}
