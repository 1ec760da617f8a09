//! In-memory adapters
//!
//! Process-local implementations of the store and summary-cache ports. Each
//! collection sits behind its own `RwLock`.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use anyhow::anyhow;
use uuid::Uuid;

use crate::core::models::{Assessment, CorrectiveAction, NonConformity};
use crate::core::ports::{ActionRepository, AssessmentRepository, NcrRepository, SummaryCache};
use crate::core::services::NcrSummary;

/// Store holding every aggregate in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    actions: RwLock<HashMap<Uuid, CorrectiveAction>>,
    ncrs: RwLock<HashMap<Uuid, NonConformity>>,
    assessments: RwLock<HashMap<Uuid, Assessment>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("in-memory store lock poisoned")
}

impl ActionRepository for MemoryStore {
    fn get_action(&self, id: Uuid) -> anyhow::Result<Option<CorrectiveAction>> {
        Ok(self.actions.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn save_action(&self, action: &CorrectiveAction) -> anyhow::Result<()> {
        self.actions.write().map_err(poisoned)?.insert(action.id, action.clone());
        Ok(())
    }

    fn delete_action(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.actions.write().map_err(poisoned)?.remove(&id).is_some())
    }

    fn list_actions(&self) -> anyhow::Result<Vec<CorrectiveAction>> {
        let mut actions: Vec<_> = self.actions.read().map_err(poisoned)?.values().cloned().collect();
        actions.sort_by_key(|a| (a.created_at, a.id));
        Ok(actions)
    }
}

impl NcrRepository for MemoryStore {
    fn get_ncr(&self, id: Uuid) -> anyhow::Result<Option<NonConformity>> {
        Ok(self.ncrs.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn save_ncr(&self, ncr: &NonConformity) -> anyhow::Result<()> {
        self.ncrs.write().map_err(poisoned)?.insert(ncr.id, ncr.clone());
        Ok(())
    }

    fn delete_ncr(&self, id: Uuid) -> anyhow::Result<bool> {
        let removed = self.ncrs.write().map_err(poisoned)?.remove(&id).is_some();
        if removed {
            self.actions.write().map_err(poisoned)?.retain(|_, a| a.non_conformity_id != id);
        }
        Ok(removed)
    }

    fn list_ncrs(&self) -> anyhow::Result<Vec<NonConformity>> {
        let mut ncrs: Vec<_> = self.ncrs.read().map_err(poisoned)?.values().cloned().collect();
        ncrs.sort_by_key(|n| (n.created_at, n.id));
        Ok(ncrs)
    }
}

impl AssessmentRepository for MemoryStore {
    fn get_assessment(&self, id: Uuid) -> anyhow::Result<Option<Assessment>> {
        Ok(self.assessments.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn save_assessment(&self, assessment: &Assessment) -> anyhow::Result<()> {
        self.assessments.write().map_err(poisoned)?.insert(assessment.id, assessment.clone());
        Ok(())
    }

    fn delete_assessment(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.assessments.write().map_err(poisoned)?.remove(&id).is_some())
    }

    fn list_assessments(&self) -> anyhow::Result<Vec<Assessment>> {
        let mut assessments: Vec<_> =
            self.assessments.read().map_err(poisoned)?.values().cloned().collect();
        assessments.sort_by_key(|a| (a.created_at, a.id));
        Ok(assessments)
    }
}

/// Summary cache backed by a hash map
#[derive(Debug, Default)]
pub struct MemorySummaryCache {
    entries: Mutex<HashMap<Uuid, NcrSummary>>,
}

impl MemorySummaryCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached summaries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |e| e.len())
    }

    /// Whether the cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an NCR has a cached summary
    #[must_use]
    pub fn contains(&self, ncr_id: Uuid) -> bool {
        self.entries.lock().is_ok_and(|e| e.contains_key(&ncr_id))
    }
}

impl SummaryCache for MemorySummaryCache {
    fn get(&self, ncr_id: Uuid) -> Option<NcrSummary> {
        self.entries.lock().ok()?.get(&ncr_id).copied()
    }

    fn put(&self, summary: NcrSummary) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(summary.ncr_id, summary);
        }
    }

    fn invalidate(&self, ncr_id: Uuid) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(&ncr_id);
        }
    }
}
