//! Tests for the JSON file store and the in-memory store

use std::fs;

use isoaudit::adapters::{JsonFileStore, MemoryStore};
use isoaudit::core::models::{ActionStatus, Assessment, NcrStatus};
use isoaudit::core::ports::{ActionRepository, AssessmentRepository, AuditStore, NcrRepository};
use tempfile::TempDir;

use crate::common::fixtures::{ActionBuilder, NcrBuilder, fixed_now};

/// Behaviour every store must share
fn exercise_store(store: &dyn AuditStore) {
    let ncr = NcrBuilder::new().title("Shared behaviour").build();
    let other = NcrBuilder::new().title("Other").build();
    store.save_ncr(&ncr).unwrap();
    store.save_ncr(&other).unwrap();

    let mut action = ActionBuilder::new(ncr.id).build();
    store.save_action(&action).unwrap();
    store.save_action(&ActionBuilder::new(other.id).build()).unwrap();

    // Saving again replaces rather than duplicates
    action.status = ActionStatus::InProgress;
    store.save_action(&action).unwrap();
    let stored = store.get_action(action.id).unwrap().unwrap();
    assert_eq!(stored.status, ActionStatus::InProgress);
    assert_eq!(store.list_actions().unwrap().len(), 2);
    assert_eq!(store.actions_for_ncr(ncr.id).unwrap().len(), 1);

    // Deleting an NCR removes its actions only
    assert!(store.delete_ncr(ncr.id).unwrap());
    assert!(!store.delete_ncr(ncr.id).unwrap());
    assert!(store.get_ncr(ncr.id).unwrap().is_none());
    assert!(store.get_action(action.id).unwrap().is_none());
    assert_eq!(store.list_actions().unwrap().len(), 1);

    let assessment = Assessment::new("Audit".into(), "lead".into(), None, fixed_now());
    store.save_assessment(&assessment).unwrap();
    assert_eq!(store.list_assessments().unwrap().len(), 1);
    assert!(store.delete_assessment(assessment.id).unwrap());
    assert!(store.get_assessment(assessment.id).unwrap().is_none());
}

#[test]
fn memory_store_behaviour() {
    exercise_store(&MemoryStore::new());
}

#[test]
fn file_store_behaviour() {
    let temp = TempDir::new().unwrap();
    exercise_store(&JsonFileStore::open(temp.path().join("store.json")));
}

#[test]
fn file_store_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data").join("store.json");

    let mut ncr = NcrBuilder::new().build();
    {
        let store = JsonFileStore::open(&path);
        store.save_ncr(&ncr).unwrap();
        ncr.status = NcrStatus::InProgress;
        store.save_ncr(&ncr).unwrap();
    }

    let reopened = JsonFileStore::open(&path);
    let loaded = reopened.get_ncr(ncr.id).unwrap().unwrap();
    assert_eq!(loaded, ncr);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn file_store_document_is_camel_case_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    let store = JsonFileStore::open(&path);
    let ncr = NcrBuilder::new().build();
    store.save_ncr(&ncr).unwrap();
    store.save_action(&ActionBuilder::new(ncr.id).build()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["nonConformities"][0]["status"], "OPEN");
    assert_eq!(json["correctiveActions"][0]["nonConformityId"], ncr.id.to_string());
}

#[test]
fn initialize_creates_once() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::open(temp.path().join("store.json"));
    assert!(store.initialize().unwrap());
    assert!(!store.initialize().unwrap());
    assert!(store.list_ncrs().unwrap().is_empty());
}

#[test]
fn unreadable_document_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    fs::write(&path, "{ broken").unwrap();

    let store = JsonFileStore::open(&path);
    assert!(store.list_ncrs().is_err());

    fs::write(&path, r#"{"version": 99}"#).unwrap();
    let err = store.list_ncrs().unwrap_err();
    assert!(format!("{err:#}").contains("newer version"));
}
