use std::io;

use chrono::Local;
use citizenship::eligibility::{CountryRegistry, DocumentIssue, EvaluateResponse, Outcome, RunSummary};
use citizenship::error::AppError;
use serde::Serialize;

pub(crate) fn json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::from)?;
    println!();
    Ok(())
}

pub(crate) fn countries(registry: &CountryRegistry) {
    println!("Supported countries");
    for country in registry.all() {
        let visa_free = country
            .visa_free_countries
            .map(|count| format!(" | visa-free to {count} countries"))
            .unwrap_or_default();
        println!(
            "- {} {} ({}) [{}]{}",
            country.flag,
            country.name,
            country.code,
            country.status.label(),
            visa_free
        );
        println!("  {}", country.short_description);
        if let Some(rules) = registry.rules(&country.code) {
            println!("  Rules version {} (updated {})", rules.version, rules.last_updated);
        }
    }
}

pub(crate) fn evaluation(
    registry: &CountryRegistry,
    country_code: &str,
    response: &EvaluateResponse,
) {
    println!(
        "{} {} eligibility (rules {})",
        registry.country_flag(country_code),
        registry.country_name(country_code),
        response.rules_version
    );
    if let Some(rule) = &response.matched_rule {
        println!("Matched rule: {rule}");
    } else {
        println!("Matched rule: none (default result)");
    }
    outcome(&response.result);
}

pub(crate) fn outcome(result: &Outcome) {
    println!("Status: {}", result.status.label());
    println!("{}", result.explanation);
    if let Some(reasoning) = &result.reasoning {
        println!("\n{reasoning}");
    }

    if !result.documents.is_empty() {
        println!("\nDocuments");
        for document in &result.documents {
            let marker = if document.mandatory { "required" } else { "optional" };
            println!("- {} ({marker}): {}", document.name, document.description);
            if let Some(tips) = &document.tips {
                println!("  Tip: {tips}");
            }
        }
    }

    if !result.next_steps.is_empty() {
        println!("\nNext steps");
        let mut steps: Vec<_> = result.next_steps.iter().collect();
        steps.sort_by_key(|step| step.order);
        for step in steps {
            println!("{}. {}: {}", step.order, step.title, step.description);
            if let Some(link) = &step.link {
                println!("   {link}");
            }
        }
    }

    if let Some(caveats) = &result.caveats {
        println!("\nCaveats");
        for caveat in caveats {
            println!("- {caveat}");
        }
    }
}

pub(crate) fn issues(origin: &str, issues: &[DocumentIssue]) {
    if issues.is_empty() {
        println!("{origin}: ok");
        return;
    }
    println!("{origin}: {} issue(s)", issues.len());
    for issue in issues {
        let severity = if issue.is_fatal() { "error" } else { "warning" };
        println!("  - [{severity}] {issue}");
    }
}

pub(crate) fn history(runs: &[RunSummary]) {
    if runs.is_empty() {
        println!("No saved runs");
        return;
    }
    for run in runs {
        println!(
            "- {} {} {} -> {} (rules {}, {})",
            run.id,
            run.country_flag,
            run.country_name,
            run.status.label(),
            run.rules_version,
            run.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        );
    }
}
