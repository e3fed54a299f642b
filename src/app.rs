use crate::models::{AppState, Question, QuestionType};

/// Options controlling which questions a quiz session asks.
#[derive(Debug, Clone, Default)]
pub struct QuizConfig {
    /// Ask unpublished questions too.
    pub include_unpublished: bool,
}

pub struct App {
    pub state: AppState,
    questions: Vec<Question>,
    current_question_index: usize,
    selected_option: usize,
    input: String,
    status: Option<String>,
    answers: Vec<Option<String>>,
    result_scroll: usize,
}

impl App {
    /// Start a session over the published questions.
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self::with_config(questions, &QuizConfig::default())
    }

    pub fn with_config(questions: Vec<Question>, config: &QuizConfig) -> Self {
        let questions: Vec<Question> = questions
            .into_iter()
            .filter(|question| config.include_unpublished || question.published)
            .collect();
        let num_questions = questions.len();

        Self {
            state: AppState::Welcome,
            questions,
            current_question_index: 0,
            selected_option: 0,
            input: String::new(),
            status: None,
            answers: vec![None; num_questions],
            result_scroll: 0,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    fn option_count(&self) -> usize {
        self.current_question()
            .map_or(0, |question| question.options.len())
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.status = None;
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Enter the quiz, or go straight to the results when there is nothing
    /// to ask.
    pub fn start_quiz(&mut self) {
        self.state = if self.questions.is_empty() {
            AppState::Result
        } else {
            AppState::Quiz
        };
    }

    pub fn submit_answer(&mut self) {
        let Some(question) = self.current_question() else {
            self.state = AppState::Result;
            return;
        };

        let answer = match question.kind {
            QuestionType::ShortAnswer => Some(self.input.clone()),
            QuestionType::MultipleChoice => question.options.get(self.selected_option).cloned(),
        };

        match answer {
            Some(answer) if question.is_valid(&answer) => {
                tracing::debug!(id = question.id, %answer, "answer submitted");
                self.answers[self.current_question_index] = Some(answer);
                self.advance();
            }
            Some(answer) => {
                tracing::warn!(id = question.id, %answer, "answer rejected");
                self.status = Some(format!("\"{}\" is not one of the options", answer));
            }
            None => {
                tracing::warn!(id = question.id, "question has no options, skipping");
                self.advance();
            }
        }
    }

    fn advance(&mut self) {
        self.current_question_index += 1;
        self.selected_option = 0;
        self.input.clear();
        self.status = None;

        if self.current_question_index >= self.questions.len() {
            self.state = AppState::Result;
        }
    }

    pub fn is_answer_correct(&self, index: usize) -> bool {
        match (self.questions.get(index), self.answers.get(index)) {
            (Some(question), Some(Some(answer))) => question.is_correct(answer),
            _ => false,
        }
    }

    /// Points earned over all correctly answered questions.
    pub fn calculate_score(&self) -> u64 {
        self.questions
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_answer_correct(*index))
            .map(|(_, question)| u64::from(question.points))
            .sum()
    }

    pub fn total_points(&self) -> u64 {
        self.questions
            .iter()
            .map(|question| u64::from(question.points))
            .sum()
    }

    pub fn scroll_results_down(&mut self) {
        if self.result_scroll + 1 < self.questions.len() {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.state = AppState::Welcome;
        self.current_question_index = 0;
        self.selected_option = 0;
        self.input.clear();
        self.status = None;
        self.answers = vec![None; self.questions.len()];
        self.result_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bank() -> Vec<Question> {
        vec![
            Question::new(1, "Capital", QuestionType::ShortAnswer)
                .with_expected("Paris")
                .with_points(2)
                .publish(),
            Question::new(2, "Pets", QuestionType::MultipleChoice)
                .add_option("Cat")
                .add_option("Dog")
                .with_expected("Dog")
                .with_points(3)
                .publish(),
            Question::new(3, "Draft", QuestionType::ShortAnswer).with_expected("x"),
        ]
    }

    fn type_answer(app: &mut App, text: &str) {
        for c in text.chars() {
            app.push_char(c);
        }
    }

    #[test]
    fn test_only_published_questions_are_asked() {
        let app = App::with_questions(bank());
        assert_eq!(app.total_questions(), 2);
        assert_eq!(app.total_points(), 5);

        let all = App::with_config(bank(), &QuizConfig { include_unpublished: true });
        assert_eq!(all.total_questions(), 3);
    }

    #[test]
    fn test_full_session_scores_points() {
        let mut app = App::with_questions(bank());
        app.start_quiz();
        assert_eq!(app.state, AppState::Quiz);

        type_answer(&mut app, "  paris ");
        app.submit_answer();
        assert_eq!(app.current_question_number(), 2);
        assert_eq!(app.input(), "");

        app.select_next_option();
        app.submit_answer();
        assert_eq!(app.state, AppState::Result);

        assert_eq!(
            app.answers(),
            &[Some("  paris ".to_string()), Some("Dog".to_string())]
        );
        assert_eq!(app.calculate_score(), 5);
    }

    #[test]
    fn test_wrong_answers_score_nothing() {
        let mut app = App::with_questions(bank());
        app.start_quiz();
        type_answer(&mut app, "London");
        app.submit_answer();
        app.submit_answer();
        assert_eq!(app.state, AppState::Result);
        assert!(!app.is_answer_correct(0));
        assert!(!app.is_answer_correct(1));
        assert_eq!(app.calculate_score(), 0);
    }

    #[test]
    fn test_option_selection_wraps() {
        let mut app = App::with_questions(bank());
        app.start_quiz();
        app.submit_answer();

        app.select_previous_option();
        assert_eq!(app.selected_option(), 1);
        app.select_next_option();
        assert_eq!(app.selected_option(), 0);
    }

    #[test]
    fn test_question_without_options_is_skipped() {
        let questions = vec![Question::new(1, "Empty", QuestionType::MultipleChoice).publish()];
        let mut app = App::with_questions(questions);
        app.start_quiz();
        app.select_next_option();
        assert_eq!(app.selected_option(), 0);
        app.submit_answer();
        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.answers(), &[None]);
    }

    #[test]
    fn test_empty_session_goes_to_results() {
        let mut app = App::with_questions(Vec::new());
        app.start_quiz();
        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.calculate_score(), 0);
    }

    #[test]
    fn test_large_point_values_add_up() {
        let questions = vec![
            Question::new(1, "Heavy", QuestionType::ShortAnswer)
                .with_expected("a")
                .with_points(u32::MAX)
                .publish(),
            Question::new(2, "Light", QuestionType::ShortAnswer)
                .with_expected("b")
                .publish(),
        ];
        let mut app = App::with_questions(questions);
        assert_eq!(app.total_points(), u64::from(u32::MAX) + 1);

        app.start_quiz();
        type_answer(&mut app, "a");
        app.submit_answer();
        type_answer(&mut app, "b");
        app.submit_answer();
        assert_eq!(app.calculate_score(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_restart_clears_progress() {
        let mut app = App::with_questions(bank());
        app.start_quiz();
        type_answer(&mut app, "Paris");
        app.submit_answer();
        app.submit_answer();
        app.scroll_results_down();
        assert_eq!(app.result_scroll(), 1);
        app.scroll_results_down();
        assert_eq!(app.result_scroll(), 1);

        app.restart();
        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.current_question_number(), 1);
        assert_eq!(app.result_scroll(), 0);
        assert_eq!(app.answers(), &[None, None]);
    }
}
