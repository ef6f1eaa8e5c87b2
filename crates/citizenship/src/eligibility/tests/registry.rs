use std::fs;

use super::common::*;
use crate::eligibility::registry::{
    parse_document, CountryMetadata, CountryRegistry, CountryStatus, RuleDocumentError,
};
use crate::eligibility::validation::DocumentIssue;

#[test]
fn builtin_registry_lists_shipped_countries() {
    let registry = registry();

    let codes: Vec<&str> = registry.all().iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["jm", "it", "pl"]);

    let active: Vec<&str> = registry.active().iter().map(|c| c.code.as_str()).collect();
    assert_eq!(active, vec!["jm"]);

    let coming: Vec<&str> = registry
        .coming_soon()
        .iter()
        .map(|c| c.code.as_str())
        .collect();
    assert_eq!(coming, vec!["it", "pl"]);
}

#[test]
fn only_active_countries_expose_rules() {
    let registry = registry();

    let rules = registry.rules("jm").expect("jamaica rules");
    assert_eq!(rules.version, "1.0.0");
    assert!(registry.rules("it").is_none());
    assert!(registry.rules("xx").is_none());
    assert!(!registry.is_active("pl"));
}

#[test]
fn disabled_country_hides_registered_rules() {
    let mut countries = registry().all().to_vec();
    for country in &mut countries {
        if country.code == "jm" {
            country.status = CountryStatus::Disabled;
        }
    }
    let mut registry = CountryRegistry::new(countries);
    registry.register(jamaica()).expect("register");

    assert!(registry.rules("jm").is_none());
    assert_eq!(registry.documents().count(), 1);
}

#[test]
fn name_and_flag_fall_back_for_unknown_codes() {
    let registry = registry();

    assert_eq!(registry.country_name("jm"), "Jamaica");
    assert_eq!(registry.country_flag("jm"), "🇯🇲");
    assert_eq!(registry.country_name("fr"), "FR");
    assert_eq!(registry.country_flag("fr"), "🌍");
}

#[test]
fn registering_unlisted_country_makes_it_active() {
    let mut registry = CountryRegistry::default();
    let document = linear_document(&["a", "b"]);

    registry.register(document).expect("register");

    let country: &CountryMetadata = registry.country("zz").expect("auto-listed country");
    assert_eq!(country.name, "Testland");
    assert_eq!(country.status, CountryStatus::Active);
    assert!(registry.rules("zz").is_some());
}

#[test]
fn register_rejects_fatal_documents() {
    let mut registry = CountryRegistry::default();

    match registry.register(linear_document(&[])) {
        Err(RuleDocumentError::Invalid {
            country_code,
            issues,
        }) => {
            assert_eq!(country_code, "zz");
            assert_eq!(issues, vec![DocumentIssue::NoQuestions]);
        }
        other => panic!("expected invalid document error, got {other:?}"),
    }
    assert!(registry.country("zz").is_none());
}

#[test]
fn register_replaces_existing_rules() {
    let mut registry = registry();
    let mut updated = jamaica();
    updated.version = "1.1.0".to_string();

    registry.register(updated).expect("register");

    assert_eq!(registry.rules("jm").map(|doc| doc.version.as_str()), Some("1.1.0"));
    assert_eq!(registry.all().len(), 3);
}

#[test]
fn loads_json_documents_from_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let document = linear_document(&["a", "b"]);
    let raw = serde_json::to_string_pretty(&document).expect("serialize");
    fs::write(dir.path().join("zz-v1.json"), raw).expect("write rules");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("write notes");

    let mut registry = registry();
    let loaded = registry.load_rules_dir(dir.path()).expect("load rules");

    assert_eq!(loaded, 1);
    assert_eq!(
        registry.rules("zz").map(|doc| doc.questions.len()),
        Some(2)
    );
}

#[test]
fn load_rules_dir_reports_malformed_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("broken.json"), "{ not json").expect("write rules");

    let mut registry = CountryRegistry::default();
    match registry.load_rules_dir(dir.path()) {
        Err(RuleDocumentError::Parse { origin, .. }) => assert!(origin.ends_with("broken.json")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn load_rules_dir_reports_missing_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent");

    let mut registry = CountryRegistry::default();
    match registry.load_rules_dir(&missing) {
        Err(RuleDocumentError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn parse_document_reads_camel_case_layout() {
    let raw = r#"{
        "countryCode": "zz",
        "version": "2.0.0",
        "countryName": "Testland",
        "description": "Synthetic rules",
        "questions": [
            { "id": "a", "text": "A?", "type": "boolean", "required": true }
        ],
        "questionFlow": [
            { "questionId": "a", "branches": [], "defaultNext": null }
        ],
        "rules": [],
        "defaultResult": { "status": "needs_info", "explanation": "fallback" },
        "lastUpdated": "2025-01-01",
        "sources": []
    }"#;

    let document = parse_document(raw, "inline").expect("parse");

    assert_eq!(document.version, "2.0.0");
    assert_eq!(document.questions[0].id, "a");
    assert!(document.question_flow[0].default_next.is_none());
}
