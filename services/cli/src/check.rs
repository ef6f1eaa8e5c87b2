use std::io::{self, BufRead, Write};
use std::sync::Arc;

use citizenship::eligibility::{
    advance, current_question, progress_percent, restart, retreat, AnswerKind,
    InMemoryRunRepository, Question, RuleDocument, WizardState,
};
use citizenship::error::AppError;
use clap::Args;
use tracing::info;

use crate::infra::Runtime;
use crate::render;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Country code to check eligibility for
    #[arg(long, short, default_value = "jm")]
    pub(crate) country: String,
}

pub(crate) fn run_check(runtime: &Runtime, args: CheckArgs) -> Result<(), AppError> {
    let service = runtime.service(Arc::new(InMemoryRunRepository::default()));
    let state = service.start(&args.country)?;
    let document = service.rules(&args.country)?;

    println!(
        "{} {} eligibility check (rules {})",
        runtime.registry.country_flag(&args.country),
        runtime.registry.country_name(&args.country),
        document.version
    );
    println!("Type 'back' to revisit the previous question, 'restart' to start over, or 'quit'.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let finished = run_session(document, state, stdin.lock(), &mut stdout)?;

    match finished {
        Some(WizardState {
            result: Some(result),
            answers,
            ..
        }) => {
            info!(
                country = %args.country,
                status = result.status.label(),
                answered = answers.len(),
                "eligibility check completed"
            );
            println!();
            render::outcome(&result);
        }
        _ => println!("\nCheck abandoned; no answers were kept."),
    }
    Ok(())
}

/// Prompts until the wizard completes. Returns `None` when the user quits or
/// input runs out first.
pub(crate) fn run_session<R, W>(
    document: &RuleDocument,
    mut state: WizardState,
    input: R,
    output: &mut W,
) -> Result<Option<WizardState>, AppError>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    while !state.is_complete {
        let Some(question) = current_question(document, &state) else {
            return Ok(None);
        };
        prompt(output, question, progress_percent(document, &state))?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;

        match Reply::parse(question, &line) {
            Reply::Quit => return Ok(None),
            Reply::Back if state.answered_questions.is_empty() => {
                writeln!(output, "  Already at the first question.")?;
            }
            Reply::Back => state = retreat(document, &state),
            Reply::Restart => state = restart(document)?,
            Reply::Answer(value) => state = advance(document, &state, &question.id, &value),
            Reply::Unrecognized => writeln!(output, "  {}", hint(question))?,
        }
    }

    Ok(Some(state))
}

fn prompt<W: Write>(output: &mut W, question: &Question, progress: u8) -> io::Result<()> {
    writeln!(output, "\n[{progress:>3}%] {}", question.text)?;
    if let Some(help) = &question.help_text {
        writeln!(output, "       {help}")?;
    }
    match question.kind {
        AnswerKind::Boolean => writeln!(output, "       (yes/no)")?,
        AnswerKind::Select => {
            for (index, option) in question.options.iter().enumerate() {
                writeln!(output, "       {}. {}", index + 1, option.label)?;
            }
        }
        AnswerKind::Text => {}
    }
    write!(output, "> ")?;
    output.flush()
}

fn hint(question: &Question) -> String {
    match question.kind {
        AnswerKind::Boolean => "Please answer yes or no.".to_string(),
        AnswerKind::Select => format!(
            "Please choose an option number between 1 and {}.",
            question.options.len()
        ),
        AnswerKind::Text => "Please enter an answer.".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Answer(String),
    Back,
    Restart,
    Quit,
    Unrecognized,
}

impl Reply {
    fn parse(question: &Question, raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "back" | "b" => return Reply::Back,
            "restart" => return Reply::Restart,
            "quit" | "q" | "exit" => return Reply::Quit,
            _ => {}
        }

        normalize_answer(question, trimmed)
            .filter(|value| question.accepts(value))
            .map_or(Reply::Unrecognized, Reply::Answer)
    }
}

/// Maps loose console input onto the stored answer form.
fn normalize_answer(question: &Question, raw: &str) -> Option<String> {
    let lowered = raw.to_ascii_lowercase();
    match question.kind {
        AnswerKind::Boolean => match lowered.as_str() {
            "y" | "yes" | "true" | "1" => Some("true".to_string()),
            "n" | "no" | "false" | "0" => Some("false".to_string()),
            _ => None,
        },
        AnswerKind::Select => {
            if let Ok(position) = lowered.parse::<usize>() {
                return position
                    .checked_sub(1)
                    .and_then(|index| question.options.get(index))
                    .map(|option| option.value.clone());
            }
            question
                .options
                .iter()
                .find(|option| {
                    option.value.eq_ignore_ascii_case(raw) || option.label.eq_ignore_ascii_case(raw)
                })
                .map(|option| option.value.clone())
        }
        AnswerKind::Text => Some(raw.to_string()).filter(|value| !value.is_empty()),
    }
}
