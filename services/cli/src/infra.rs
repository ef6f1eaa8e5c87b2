use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use citizenship::config::AppConfig;
use citizenship::eligibility::{
    AnswerSet, CountryRegistry, EligibilityService, InMemoryRunRepository,
};
use citizenship::error::AppError;
use citizenship::telemetry;
use serde_json::Value;
use tracing::{debug, info};

/// Configuration and rules shared by every subcommand.
pub(crate) struct Runtime {
    pub(crate) config: AppConfig,
    pub(crate) registry: Arc<CountryRegistry>,
}

impl Runtime {
    pub(crate) fn service(
        &self,
        repository: Arc<InMemoryRunRepository>,
    ) -> EligibilityService<InMemoryRunRepository> {
        EligibilityService::new(self.registry.clone(), repository)
            .with_history_limit(self.config.history.limit)
    }
}

pub(crate) fn bootstrap() -> Result<Runtime, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mut registry = CountryRegistry::builtin()?;
    if let Some(dir) = &config.rules.directory {
        let loaded = registry.load_rules_dir(dir)?;
        info!(directory = %dir.display(), loaded, "loaded additional rule documents");
    }

    debug!(
        ?config.environment,
        countries = registry.all().len(),
        "eligibility runtime ready"
    );

    Ok(Runtime {
        config,
        registry: Arc::new(registry),
    })
}

/// Parses `QUESTION_ID=VALUE` pairs given on the command line.
pub(crate) fn parse_answer(raw: &str) -> Result<(String, String), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION_ID=VALUE, got '{raw}'"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing question id in '{raw}'"));
    }
    Ok((id.to_string(), value.trim().to_string()))
}

pub(crate) fn read_answers_file(path: &Path) -> Result<AnswerSet, AppError> {
    let raw = fs::read_to_string(path)?;
    parse_answers(&raw, &path.display().to_string())
}

/// Answers from a JSON object. Booleans and numbers are stored in their string form.
pub(crate) fn parse_answers(raw: &str, origin: &str) -> Result<AnswerSet, AppError> {
    let values: BTreeMap<String, Value> = serde_json::from_str(raw).map_err(|err| {
        AppError::Input(format!("{origin} is not a JSON object of answers: {err}"))
    })?;

    let mut answers = AnswerSet::new();
    for (question_id, value) in values {
        let value = match value {
            Value::String(text) => text,
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
            other => {
                return Err(AppError::Input(format!(
                    "{origin}: answer for '{question_id}' must be a JSON scalar, got {other}"
                )))
            }
        };
        answers.insert(question_id, value);
    }
    Ok(answers)
}
