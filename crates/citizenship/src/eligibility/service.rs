use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{AnswerSet, Outcome, RuleDocument};
use super::evaluation::explain;
use super::registry::CountryRegistry;
use super::repository::{EligibilityRun, RepositoryError, RunId, RunRepository, RunSummary, UserId};
use super::wizard::{initialize, WizardError, WizardState};

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Service composing the country registry, the rule engine, and run storage.
pub struct EligibilityService<R> {
    registry: Arc<CountryRegistry>,
    repository: Arc<R>,
    history_limit: usize,
}

static RUN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_run_id() -> RunId {
    let id = RUN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RunId(format!("run-{id:06}"))
}

/// One-shot evaluation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub result: Outcome,
    pub rules_version: String,
    pub matched_rule: Option<String>,
}

/// Completed run submitted for saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRunRequest {
    pub country_code: String,
    pub rules_version: String,
    pub answers: AnswerSet,
    pub result: Outcome,
}

impl SaveRunRequest {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let code_len = self.country_code.chars().count();
        if !(2..=10).contains(&code_len) {
            return Err(ServiceError::InvalidRequest(
                "countryCode must be between 2 and 10 characters".to_string(),
            ));
        }
        let version_len = self.rules_version.chars().count();
        if !(1..=50).contains(&version_len) {
            return Err(ServiceError::InvalidRequest(
                "rulesVersion must be between 1 and 50 characters".to_string(),
            ));
        }
        Ok(())
    }
}

impl<R> EligibilityService<R>
where
    R: RunRepository + 'static,
{
    pub fn new(registry: Arc<CountryRegistry>, repository: Arc<R>) -> Self {
        Self {
            registry,
            repository,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn registry(&self) -> &CountryRegistry {
        &self.registry
    }

    /// Rules for an active country.
    pub fn rules(&self, country_code: &str) -> Result<&RuleDocument, ServiceError> {
        if !self.registry.is_active(country_code) {
            return Err(ServiceError::CountryUnavailable(country_code.to_string()));
        }
        self.registry
            .rules(country_code)
            .ok_or_else(|| ServiceError::RulesNotFound(country_code.to_string()))
    }

    /// Stateless evaluation without wizard bookkeeping.
    pub fn evaluate(
        &self,
        country_code: &str,
        answers: &AnswerSet,
    ) -> Result<EvaluateResponse, ServiceError> {
        let document = self.rules(country_code)?;
        let evaluation = explain(document, answers);

        debug!(
            country = country_code,
            matched_rule = evaluation.matched_rule.as_deref().unwrap_or("default"),
            status = evaluation.outcome.status.label(),
            "evaluated eligibility"
        );

        Ok(EvaluateResponse {
            result: evaluation.outcome,
            rules_version: document.version.clone(),
            matched_rule: evaluation.matched_rule,
        })
    }

    /// Initial wizard state for an active country.
    pub fn start(&self, country_code: &str) -> Result<WizardState, ServiceError> {
        let document = self.rules(country_code)?;
        Ok(initialize(document)?)
    }

    /// Persists a completed run for the given user.
    ///
    /// A rules version that differs from the registered one is logged and the
    /// run is still saved, since rules may have been updated mid-session.
    pub fn save_run(&self, user: &UserId, request: SaveRunRequest) -> Result<RunId, ServiceError> {
        request.validate()?;

        if !self.registry.is_active(&request.country_code) {
            return Err(ServiceError::CountryUnavailable(request.country_code));
        }

        if let Some(document) = self.registry.rules(&request.country_code) {
            if document.version != request.rules_version {
                warn!(
                    country = %request.country_code,
                    expected = %document.version,
                    received = %request.rules_version,
                    "rules version mismatch"
                );
            }
        }

        let run = EligibilityRun {
            id: next_run_id(),
            user_id: user.clone(),
            country_code: request.country_code,
            rules_version: request.rules_version,
            answers: request.answers,
            result: request.result,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(run)?;
        info!(run_id = %stored.id, country = %stored.country_code, "saved eligibility run");
        Ok(stored.id)
    }

    pub fn run(&self, id: &RunId) -> Result<EligibilityRun, ServiceError> {
        let run = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(run)
    }

    /// Most recent runs for a user, capped by the configured history limit.
    pub fn history(&self, user: &UserId) -> Result<Vec<RunSummary>, ServiceError> {
        let runs = self.repository.for_user(user, self.history_limit)?;

        Ok(runs
            .into_iter()
            .map(|run| RunSummary {
                country_name: self.registry.country_name(&run.country_code),
                country_flag: self.registry.country_flag(&run.country_code),
                status: run.result.status,
                id: run.id,
                country_code: run.country_code,
                rules_version: run.rules_version,
                created_at: run.created_at,
            })
            .collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("country '{0}' is not available for eligibility checks")]
    CountryUnavailable(String),
    #[error("rules not found for country '{0}'")]
    RulesNotFound(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
