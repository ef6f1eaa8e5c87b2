mod countries;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::RuleDocument;
use super::validation::{validate_document, DocumentIssue};

const FALLBACK_FLAG: &str = "🌍";

/// Availability gate for a country's eligibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryStatus {
    Active,
    ComingSoon,
    Disabled,
}

impl CountryStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CountryStatus::Active => "active",
            CountryStatus::ComingSoon => "coming_soon",
            CountryStatus::Disabled => "disabled",
        }
    }
}

/// Display metadata for a country offered by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryMetadata {
    /// ISO 3166-1 alpha-2, lowercase.
    pub code: String,
    pub name: String,
    pub flag: String,
    pub short_description: String,
    pub status: CountryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visa_free_countries: Option<u16>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// Lookup of country metadata and rule documents, constructed by the caller
/// and injected wherever rules are needed.
#[derive(Debug, Clone, Default)]
pub struct CountryRegistry {
    countries: Vec<CountryMetadata>,
    rules: HashMap<String, RuleDocument>,
}

impl CountryRegistry {
    pub fn new(countries: Vec<CountryMetadata>) -> Self {
        Self {
            countries,
            rules: HashMap::new(),
        }
    }

    /// Registry with the shipped country list and Jamaica's descent rules.
    pub fn builtin() -> Result<Self, RuleDocumentError> {
        let mut registry = Self::new(countries::standard_countries());
        let jamaica = parse_document(countries::JAMAICA_DESCENT_RULES, "jm-cbd-v1.json")?;
        registry.register(jamaica)?;
        Ok(registry)
    }

    /// Adds or replaces the rules for a country.
    ///
    /// Documents with fatal issues are rejected; other issues are logged. A
    /// document for a country without metadata registers that country as active.
    pub fn register(&mut self, document: RuleDocument) -> Result<(), RuleDocumentError> {
        let issues = validate_document(&document);
        let (fatal, tolerated): (Vec<_>, Vec<_>) =
            issues.into_iter().partition(DocumentIssue::is_fatal);

        if !fatal.is_empty() {
            return Err(RuleDocumentError::Invalid {
                country_code: document.country_code,
                issues: fatal,
            });
        }
        for issue in &tolerated {
            warn!(country = %document.country_code, %issue, "rule document issue");
        }

        if self.country(&document.country_code).is_none() {
            self.countries.push(CountryMetadata {
                code: document.country_code.clone(),
                name: document.country_name.clone(),
                flag: FALLBACK_FLAG.to_string(),
                short_description: document.description.clone(),
                status: CountryStatus::Active,
                visa_free_countries: None,
                benefits: Vec::new(),
            });
        }

        debug!(
            country = %document.country_code,
            version = %document.version,
            "registered rule document"
        );
        self.rules.insert(document.country_code.clone(), document);
        Ok(())
    }

    /// Registers every `*.json` rule document found directly in `dir`.
    pub fn load_rules_dir(&mut self, dir: &Path) -> Result<usize, RuleDocumentError> {
        let entries = fs::read_dir(dir).map_err(|source| RuleDocumentError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RuleDocumentError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            let document = load_document(path)?;
            self.register(document)?;
        }

        Ok(paths.len())
    }

    pub fn all(&self) -> &[CountryMetadata] {
        &self.countries
    }

    pub fn active(&self) -> Vec<&CountryMetadata> {
        self.with_status(CountryStatus::Active)
    }

    pub fn coming_soon(&self) -> Vec<&CountryMetadata> {
        self.with_status(CountryStatus::ComingSoon)
    }

    fn with_status(&self, status: CountryStatus) -> Vec<&CountryMetadata> {
        self.countries
            .iter()
            .filter(|country| country.status == status)
            .collect()
    }

    pub fn country(&self, code: &str) -> Option<&CountryMetadata> {
        self.countries.iter().find(|country| country.code == code)
    }

    pub fn is_active(&self, code: &str) -> bool {
        self.country(code)
            .map(|country| country.status == CountryStatus::Active)
            .unwrap_or(false)
    }

    /// Rules for an active country; inactive or unknown countries have none.
    pub fn rules(&self, code: &str) -> Option<&RuleDocument> {
        if !self.is_active(code) {
            return None;
        }
        self.rules.get(code)
    }

    /// Every registered document regardless of country status.
    pub fn documents(&self) -> impl Iterator<Item = &RuleDocument> {
        self.rules.values()
    }

    pub fn country_name(&self, code: &str) -> String {
        self.country(code)
            .map(|country| country.name.clone())
            .unwrap_or_else(|| code.to_uppercase())
    }

    pub fn country_flag(&self, code: &str) -> String {
        self.country(code)
            .map(|country| country.flag.clone())
            .unwrap_or_else(|| FALLBACK_FLAG.to_string())
    }
}

/// Reads and parses a rule document from disk.
pub fn load_document(path: &Path) -> Result<RuleDocument, RuleDocumentError> {
    let raw = fs::read_to_string(path).map_err(|source| RuleDocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&raw, &path.display().to_string())
}

pub fn parse_document(raw: &str, origin: &str) -> Result<RuleDocument, RuleDocumentError> {
    serde_json::from_str(raw).map_err(|source| RuleDocumentError::Parse {
        origin: origin.to_string(),
        source,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum RuleDocumentError {
    #[error("unable to read rule documents at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("rule document {origin} is malformed: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },
    #[error("rule document for '{country_code}' is invalid: {}", join_issues(.issues))]
    Invalid {
        country_code: String,
        issues: Vec<DocumentIssue>,
    },
}

fn join_issues(issues: &[DocumentIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
