//! Command-line surface over a question bank file.
//!
//! Read-only commands print what they find. Commands that derive a new
//! question write the updated bank back, to `--output` when given.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use crate::data::{
    DEFAULT_QUESTIONS_PATH, find_question, load_questions_from_json, next_id,
    save_questions_to_json,
};
use crate::models::{Question, QuestionType};
use crate::{Quiz, QuizConfig, QuizError};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON file holding the question bank
    #[arg(short, long, global = true, env = "QUESTION_BANK", default_value = DEFAULT_QUESTIONS_PATH)]
    pub bank: PathBuf,

    /// Write the updated bank here instead of back to --bank
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Take the quiz in the terminal
    Run {
        /// Also ask unpublished questions
        #[arg(long)]
        all: bool,
    },
    /// Print the short form of every question
    List,
    /// Print a question as markdown
    Show { id: u64 },
    /// Check whether an answer is valid and correct
    Check { id: u64, answer: String },
    /// Add a blank question
    New {
        id: u64,
        name: String,
        #[arg(long = "type", value_enum)]
        kind: KindArg,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        expected: Option<String>,
        #[arg(long)]
        points: Option<u32>,
    },
    /// Rename a question
    Rename { id: u64, name: String },
    /// Toggle whether a question is published
    Publish { id: u64 },
    /// Add an unpublished copy of a question
    Duplicate {
        id: u64,
        /// Id for the copy (defaults to the next free id)
        #[arg(long)]
        new_id: Option<u64>,
    },
    /// Append an option to a question
    AddOption { id: u64, option: String },
    /// Add a question reusing the content of another
    Merge {
        content_id: u64,
        name: String,
        #[arg(long)]
        points: u32,
        #[arg(long)]
        new_id: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    #[value(name = "short_answer_question", alias = "short")]
    ShortAnswer,
    #[value(name = "multiple_choice_question", alias = "choice")]
    MultipleChoice,
}

impl From<KindArg> for QuestionType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::ShortAnswer => QuestionType::ShortAnswer,
            KindArg::MultipleChoice => QuestionType::MultipleChoice,
        }
    }
}

/// Run the parsed command and return the text to print.
pub fn execute(cli: &Cli) -> Result<String, QuizError> {
    let output = cli.output.as_deref().unwrap_or(cli.bank.as_path());

    match &cli.command {
        Command::Run { all } => {
            let config = QuizConfig {
                include_unpublished: *all,
            };
            Quiz::from_json(&cli.bank, &config)?.run()?;
            Ok(String::new())
        }
        Command::List => {
            let questions = load_questions_from_json(&cli.bank)?;
            let lines: Vec<String> = questions.iter().map(Question::to_short_form).collect();
            Ok(lines.join("\n"))
        }
        Command::Show { id } => {
            let questions = load_questions_from_json(&cli.bank)?;
            Ok(lookup(&questions, *id)?.to_markdown())
        }
        Command::Check { id, answer } => {
            let questions = load_questions_from_json(&cli.bank)?;
            let question = lookup(&questions, *id)?;
            Ok(format!(
                "valid: {}\ncorrect: {}",
                question.is_valid(answer),
                question.is_correct(answer)
            ))
        }
        Command::New {
            id,
            name,
            kind,
            body,
            expected,
            points,
        } => {
            let mut questions = if cli.bank.exists() {
                load_questions_from_json(&cli.bank)?
            } else {
                Vec::new()
            };
            let mut question = Question::new(*id, name.as_str(), (*kind).into());
            if let Some(body) = body {
                question = question.with_body(body.as_str());
            }
            if let Some(expected) = expected {
                question = question.with_expected(expected.as_str());
            }
            if let Some(points) = points {
                question = question.with_points(*points);
            }
            insert(&mut questions, question, output)
        }
        Command::Rename { id, name } => {
            update(&cli.bank, output, *id, |question| question.rename(name.as_str()))
        }
        Command::Publish { id } => update(&cli.bank, output, *id, Question::publish),
        Command::AddOption { id, option } => {
            update(&cli.bank, output, *id, |question| question.add_option(option.as_str()))
        }
        Command::Duplicate { id, new_id } => {
            let mut questions = load_questions_from_json(&cli.bank)?;
            let new_id = new_id
                .or_else(|| next_id(&questions))
                .ok_or(QuizError::IdsExhausted)?;
            let copy = lookup(&questions, *id)?.duplicate(new_id);
            insert(&mut questions, copy, output)
        }
        Command::Merge {
            content_id,
            name,
            points,
            new_id,
        } => {
            let mut questions = load_questions_from_json(&cli.bank)?;
            let new_id = new_id
                .or_else(|| next_id(&questions))
                .ok_or(QuizError::IdsExhausted)?;
            let content = lookup(&questions, *content_id)?;
            let merged = Question::merge(new_id, name.as_str(), content, *points);
            insert(&mut questions, merged, output)
        }
    }
}

fn lookup(questions: &[Question], id: u64) -> Result<&Question, QuizError> {
    find_question(questions, id).ok_or(QuizError::NotFound { id })
}

fn insert(
    questions: &mut Vec<Question>,
    question: Question,
    output: &Path,
) -> Result<String, QuizError> {
    if find_question(questions, question.id).is_some() {
        return Err(QuizError::IdTaken { id: question.id });
    }

    let summary = question.to_short_form();
    tracing::info!(id = question.id, path = %output.display(), "adding question");
    questions.push(question);
    save_questions_to_json(output, questions)?;
    Ok(format!("added {}", summary))
}

fn update<F>(bank: &Path, output: &Path, id: u64, derive: F) -> Result<String, QuizError>
where
    F: FnOnce(&Question) -> Question,
{
    let mut questions = load_questions_from_json(bank)?;
    let slot = questions
        .iter_mut()
        .find(|question| question.id == id)
        .ok_or(QuizError::NotFound { id })?;
    *slot = derive(&*slot);

    let summary = slot.to_short_form();
    tracing::info!(id, path = %output.display(), "updated question");
    save_questions_to_json(output, &questions)?;
    Ok(format!("updated {}", summary))
}
