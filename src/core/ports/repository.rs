//! Repository ports
//!
//! Defines the persistence interface for each aggregate. Saves are upserts;
//! each call is one unit of work against the backing store.

use uuid::Uuid;

use super::super::models::{Assessment, CorrectiveAction, NonConformity};

/// Repository for corrective actions
pub trait ActionRepository: Send + Sync {
    /// Get an action by ID
    fn get_action(&self, id: Uuid) -> anyhow::Result<Option<CorrectiveAction>>;

    /// Insert or replace an action
    fn save_action(&self, action: &CorrectiveAction) -> anyhow::Result<()>;

    /// Delete an action, returning whether it existed
    fn delete_action(&self, id: Uuid) -> anyhow::Result<bool>;

    /// List all actions, oldest first
    fn list_actions(&self) -> anyhow::Result<Vec<CorrectiveAction>>;

    /// List the actions of one non-conformity
    fn actions_for_ncr(&self, ncr_id: Uuid) -> anyhow::Result<Vec<CorrectiveAction>> {
        let all = self.list_actions()?;
        Ok(all.into_iter().filter(|a| a.non_conformity_id == ncr_id).collect())
    }
}

/// Repository for non-conformities
pub trait NcrRepository: Send + Sync {
    /// Get a non-conformity by ID
    fn get_ncr(&self, id: Uuid) -> anyhow::Result<Option<NonConformity>>;

    /// Insert or replace a non-conformity
    fn save_ncr(&self, ncr: &NonConformity) -> anyhow::Result<()>;

    /// Delete a non-conformity and its corrective actions, returning whether it existed
    fn delete_ncr(&self, id: Uuid) -> anyhow::Result<bool>;

    /// List all non-conformities, oldest first
    fn list_ncrs(&self) -> anyhow::Result<Vec<NonConformity>>;
}

/// Repository for assessments
pub trait AssessmentRepository: Send + Sync {
    /// Get an assessment by ID
    fn get_assessment(&self, id: Uuid) -> anyhow::Result<Option<Assessment>>;

    /// Insert or replace an assessment
    fn save_assessment(&self, assessment: &Assessment) -> anyhow::Result<()>;

    /// Delete an assessment, returning whether it existed
    fn delete_assessment(&self, id: Uuid) -> anyhow::Result<bool>;

    /// List all assessments, oldest first
    fn list_assessments(&self) -> anyhow::Result<Vec<Assessment>>;
}

/// A store backing every aggregate
pub trait AuditStore: ActionRepository + NcrRepository + AssessmentRepository {}

impl<T: ActionRepository + NcrRepository + AssessmentRepository> AuditStore for T {}
