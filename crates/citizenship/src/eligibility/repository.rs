use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerSet, EligibilityStatus, Outcome};

/// Identifier wrapper for saved eligibility runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated identity supplied by the caller's session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// A completed check together with the answers and rules version that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRun {
    pub id: RunId,
    pub user_id: UserId,
    pub country_code: String,
    pub rules_version: String,
    pub answers: AnswerSet,
    pub result: Outcome,
    pub created_at: DateTime<Utc>,
}

/// History list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub id: RunId,
    pub country_code: String,
    pub country_name: String,
    pub country_flag: String,
    pub status: EligibilityStatus,
    pub rules_version: String,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction for saved runs.
pub trait RunRepository: Send + Sync {
    fn insert(&self, run: EligibilityRun) -> Result<EligibilityRun, RepositoryError>;
    fn fetch(&self, id: &RunId) -> Result<Option<EligibilityRun>, RepositoryError>;
    /// Runs for a user, newest first.
    fn for_user(&self, user: &UserId, limit: usize) -> Result<Vec<EligibilityRun>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryRunRepository {
    runs: Arc<Mutex<HashMap<RunId, EligibilityRun>>>,
}

impl InMemoryRunRepository {
    pub fn len(&self) -> usize {
        self.runs.lock().expect("run repository mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RunRepository for InMemoryRunRepository {
    fn insert(&self, run: EligibilityRun) -> Result<EligibilityRun, RepositoryError> {
        let mut guard = self.runs.lock().expect("run repository mutex poisoned");
        if guard.contains_key(&run.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(run.id.clone(), run.clone());
        Ok(run)
    }

    fn fetch(&self, id: &RunId) -> Result<Option<EligibilityRun>, RepositoryError> {
        let guard = self.runs.lock().expect("run repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_user(&self, user: &UserId, limit: usize) -> Result<Vec<EligibilityRun>, RepositoryError> {
        let guard = self.runs.lock().expect("run repository mutex poisoned");
        let mut runs: Vec<EligibilityRun> = guard
            .values()
            .filter(|run| &run.user_id == user)
            .cloned()
            .collect();
        runs.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        runs.truncate(limit);
        Ok(runs)
    }
}
