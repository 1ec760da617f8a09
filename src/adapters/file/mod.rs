//! File-based audit storage
//!
//! Implements the repository ports on top of a single JSON document. Every
//! operation is a read-modify-write under one lock; writes go to a temp file
//! that is then renamed over the document.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::models::{Assessment, CorrectiveAction, NonConformity};
use crate::core::ports::{ActionRepository, AssessmentRepository, NcrRepository};

/// Current on-disk document version
pub const DOCUMENT_VERSION: u32 = 1;

/// The whole store as persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    /// Document format version
    pub version: u32,
    /// Non-conformity records
    #[serde(default)]
    pub non_conformities: Vec<NonConformity>,
    /// Corrective actions
    #[serde(default)]
    pub corrective_actions: Vec<CorrectiveAction>,
    /// Assessments
    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            non_conformities: Vec::new(),
            corrective_actions: Vec::new(),
            assessments: Vec::new(),
        }
    }
}

/// JSON document store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`. The file is created lazily on first write.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty document if none exists yet. Returns whether one was created.
    pub fn initialize(&self) -> anyhow::Result<bool> {
        let _guard = self.guard()?;
        if self.path.exists() {
            return Ok(false);
        }
        self.write(&StoreDocument::default())?;
        Ok(true)
    }

    fn guard(&self) -> anyhow::Result<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| anyhow!("file store lock poisoned"))
    }

    fn read(&self) -> anyhow::Result<StoreDocument> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let doc: StoreDocument = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        if doc.version > DOCUMENT_VERSION {
            anyhow::bail!(
                "{} was written by a newer version (document version {})",
                self.path.display(),
                doc.version
            );
        }
        Ok(doc)
    }

    fn write(&self, doc: &StoreDocument) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(doc)?;
        fs::write(&tmp, content).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        log::debug!(
            "Saved store: {} NCRs, {} actions, {} assessments",
            doc.non_conformities.len(),
            doc.corrective_actions.len(),
            doc.assessments.len()
        );
        Ok(())
    }

    fn query<T>(&self, f: impl FnOnce(&StoreDocument) -> T) -> anyhow::Result<T> {
        let _guard = self.guard()?;
        let doc = self.read()?;
        Ok(f(&doc))
    }

    fn update<T>(&self, f: impl FnOnce(&mut StoreDocument) -> T) -> anyhow::Result<T> {
        let _guard = self.guard()?;
        let mut doc = self.read()?;
        let out = f(&mut doc);
        self.write(&doc)?;
        Ok(out)
    }
}

fn upsert<T: Clone>(items: &mut Vec<T>, item: &T, same: impl Fn(&T) -> bool) {
    match items.iter_mut().find(|existing| same(existing)) {
        Some(existing) => *existing = item.clone(),
        None => items.push(item.clone()),
    }
}

fn remove<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !matches(item));
    items.len() != before
}

impl ActionRepository for JsonFileStore {
    fn get_action(&self, id: Uuid) -> anyhow::Result<Option<CorrectiveAction>> {
        self.query(|doc| doc.corrective_actions.iter().find(|a| a.id == id).cloned())
    }

    fn save_action(&self, action: &CorrectiveAction) -> anyhow::Result<()> {
        self.update(|doc| upsert(&mut doc.corrective_actions, action, |a| a.id == action.id))
    }

    fn delete_action(&self, id: Uuid) -> anyhow::Result<bool> {
        self.update(|doc| remove(&mut doc.corrective_actions, |a| a.id == id))
    }

    fn list_actions(&self) -> anyhow::Result<Vec<CorrectiveAction>> {
        self.query(|doc| {
            let mut actions = doc.corrective_actions.clone();
            actions.sort_by_key(|a| (a.created_at, a.id));
            actions
        })
    }
}

impl NcrRepository for JsonFileStore {
    fn get_ncr(&self, id: Uuid) -> anyhow::Result<Option<NonConformity>> {
        self.query(|doc| doc.non_conformities.iter().find(|n| n.id == id).cloned())
    }

    fn save_ncr(&self, ncr: &NonConformity) -> anyhow::Result<()> {
        self.update(|doc| upsert(&mut doc.non_conformities, ncr, |n| n.id == ncr.id))
    }

    fn delete_ncr(&self, id: Uuid) -> anyhow::Result<bool> {
        self.update(|doc| {
            let removed = remove(&mut doc.non_conformities, |n| n.id == id);
            if removed {
                remove(&mut doc.corrective_actions, |a| a.non_conformity_id == id);
            }
            removed
        })
    }

    fn list_ncrs(&self) -> anyhow::Result<Vec<NonConformity>> {
        self.query(|doc| {
            let mut ncrs = doc.non_conformities.clone();
            ncrs.sort_by_key(|n| (n.created_at, n.id));
            ncrs
        })
    }
}

impl AssessmentRepository for JsonFileStore {
    fn get_assessment(&self, id: Uuid) -> anyhow::Result<Option<Assessment>> {
        self.query(|doc| doc.assessments.iter().find(|a| a.id == id).cloned())
    }

    fn save_assessment(&self, assessment: &Assessment) -> anyhow::Result<()> {
        self.update(|doc| upsert(&mut doc.assessments, assessment, |a| a.id == assessment.id))
    }

    fn delete_assessment(&self, id: Uuid) -> anyhow::Result<bool> {
        self.update(|doc| remove(&mut doc.assessments, |a| a.id == id))
    }

    fn list_assessments(&self) -> anyhow::Result<Vec<Assessment>> {
        self.query(|doc| {
            let mut assessments = doc.assessments.clone();
            assessments.sort_by_key(|a| (a.created_at, a.id));
            assessments
        })
    }
}
