use std::sync::Arc;

use citizenship::eligibility::{
    advance, current_question, InMemoryRunRepository, SaveRunRequest, UserId,
};
use citizenship::error::AppError;
use clap::Args;
use tracing::warn;

use crate::infra::Runtime;
use crate::render;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// User id the scripted runs are saved under
    #[arg(long, default_value = "demo-user")]
    pub(crate) user: String,
    /// Print the saved history as JSON instead of a listing
    #[arg(long)]
    pub(crate) json: bool,
}

struct Scenario {
    title: &'static str,
    answers: &'static [(&'static str, &'static str)],
}

const JAMAICA_SCENARIOS: &[Scenario] = &[
    Scenario {
        title: "Born in Jamaica",
        answers: &[("born_in_jamaica", "true")],
    },
    Scenario {
        title: "Jamaican-born parent who was a citizen at the applicant's birth",
        answers: &[
            ("born_in_jamaica", "false"),
            ("parent_jamaican_birth", "true"),
            ("parent_citizen_at_birth", "true"),
            ("birth_registered", "yes"),
            ("can_provide_documents", "true"),
        ],
    },
    Scenario {
        title: "Jamaican-born parent, citizenship at birth unconfirmed",
        answers: &[
            ("born_in_jamaica", "false"),
            ("parent_jamaican_birth", "true"),
            ("parent_citizen_at_birth", "false"),
            ("birth_registered", "no"),
            ("can_provide_documents", "false"),
        ],
    },
    Scenario {
        title: "Jamaican-born grandparent, parent registered",
        answers: &[
            ("born_in_jamaica", "false"),
            ("parent_jamaican_birth", "false"),
            ("grandparent_jamaican_birth", "true"),
            ("parent_registered", "yes"),
            ("birth_registered", "yes"),
            ("can_provide_documents", "true"),
        ],
    },
    Scenario {
        title: "Jamaican-born grandparent, parent registration unknown",
        answers: &[
            ("born_in_jamaica", "false"),
            ("parent_jamaican_birth", "false"),
            ("grandparent_jamaican_birth", "true"),
            ("parent_registered", "unsure"),
            ("birth_registered", "unsure"),
            ("can_provide_documents", "true"),
        ],
    },
    Scenario {
        title: "No Jamaican lineage",
        answers: &[
            ("born_in_jamaica", "false"),
            ("parent_jamaican_birth", "false"),
            ("grandparent_jamaican_birth", "false"),
        ],
    },
];

pub(crate) fn run_demo(runtime: &Runtime, args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryRunRepository::default());
    let service = runtime.service(repository.clone());
    let user = UserId(args.user);
    let document = service.rules("jm")?;

    println!("Jamaica citizenship-by-descent demo (rules {})", document.version);

    for scenario in JAMAICA_SCENARIOS {
        println!("\n{}", scenario.title);
        let mut state = service.start("jm")?;

        while !state.is_complete {
            let Some(question) = current_question(document, &state) else {
                break;
            };
            let Some((_, value)) = scenario
                .answers
                .iter()
                .find(|(question_id, _)| *question_id == question.id)
            else {
                warn!(question = %question.id, "demo scenario has no scripted answer");
                break;
            };
            println!("  {} -> {}", question.text, value);
            state = advance(document, &state, &question.id, value);
        }

        let Some(result) = state.result.clone() else {
            println!("  Scenario did not complete");
            continue;
        };
        println!(
            "  Result: {} ({} of {} questions asked)",
            result.status.label(),
            state.question_history.len(),
            document.questions.len()
        );

        let run_id = service.save_run(
            &user,
            SaveRunRequest {
                country_code: state.country_code.clone(),
                rules_version: document.version.clone(),
                answers: state.answers,
                result,
            },
        )?;
        println!("  Saved as {run_id}");
    }

    let history = service.history(&user)?;
    println!("\nSaved history for {} ({} runs stored)", user.0, repository.len());
    if args.json {
        render::json(&history)
    } else {
        render::history(&history);
        Ok(())
    }
}
