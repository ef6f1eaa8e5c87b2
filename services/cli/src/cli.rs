use std::path::PathBuf;
use std::sync::Arc;

use citizenship::eligibility::{
    load_document, validate_document, AnswerSet, DocumentIssue, InMemoryRunRepository,
    RuleDocumentError,
};
use citizenship::error::AppError;
use clap::{Args, Parser, Subcommand};

use crate::check::{run_check, CheckArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::infra::{bootstrap, parse_answer, read_answers_file, Runtime};
use crate::render;

#[derive(Parser, Debug)]
#[command(
    name = "eligibility",
    about = "Check citizenship-by-descent eligibility from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List supported countries and their availability (default command)
    Countries(CountriesArgs),
    /// Evaluate a complete set of answers in one shot
    Evaluate(EvaluateArgs),
    /// Answer the eligibility questions interactively
    Check(CheckArgs),
    /// Report configuration problems in rule documents
    Validate(ValidateArgs),
    /// Walk scripted Jamaica scenarios and print the saved history
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
struct CountriesArgs {
    /// Print the registry as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Country code whose rules are applied
    #[arg(long, short)]
    country: String,
    /// Answer as QUESTION_ID=VALUE; repeat for each question
    #[arg(long = "answer", short, value_parser = parse_answer)]
    answer: Vec<(String, String)>,
    /// JSON object of answers keyed by question id
    #[arg(long = "answers")]
    answers_file: Option<PathBuf>,
    /// Print the evaluation as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Validate a single rule document instead of the loaded registry
    #[arg(long)]
    file: Option<PathBuf>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let runtime = bootstrap()?;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Countries(CountriesArgs::default()));

    match command {
        Command::Countries(args) => run_countries(&runtime, args),
        Command::Evaluate(args) => run_evaluate(&runtime, args),
        Command::Check(args) => run_check(&runtime, args),
        Command::Validate(args) => run_validate(&runtime, args),
        Command::Demo(args) => run_demo(&runtime, args),
    }
}

fn run_countries(runtime: &Runtime, args: CountriesArgs) -> Result<(), AppError> {
    if args.json {
        return render::json(&runtime.registry.all());
    }
    render::countries(&runtime.registry);
    Ok(())
}

fn run_evaluate(runtime: &Runtime, args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        country,
        answer,
        answers_file,
        json,
    } = args;

    let mut answers = match answers_file {
        Some(path) => read_answers_file(&path)?,
        None => AnswerSet::new(),
    };
    for (question_id, value) in answer {
        answers.insert(question_id, value);
    }

    let service = runtime.service(Arc::new(InMemoryRunRepository::default()));
    let response = service.evaluate(&country, &answers)?;

    if json {
        render::json(&response)
    } else {
        render::evaluation(&runtime.registry, &country, &response);
        Ok(())
    }
}

fn run_validate(runtime: &Runtime, args: ValidateArgs) -> Result<(), AppError> {
    let Some(path) = args.file else {
        let mut documents: Vec<_> = runtime.registry.documents().collect();
        documents.sort_by(|a, b| a.country_code.cmp(&b.country_code));
        for document in documents {
            let origin = format!("{} v{}", document.country_code, document.version);
            render::issues(&origin, &validate_document(document));
        }
        return Ok(());
    };

    let document = load_document(&path)?;
    let issues = validate_document(&document);
    render::issues(&path.display().to_string(), &issues);

    let fatal: Vec<DocumentIssue> = issues.into_iter().filter(DocumentIssue::is_fatal).collect();
    if fatal.is_empty() {
        Ok(())
    } else {
        Err(RuleDocumentError::Invalid {
            country_code: document.country_code,
            issues: fatal,
        }
        .into())
    }
}
