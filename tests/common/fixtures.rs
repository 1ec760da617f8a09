//! Test fixtures and builders
//!
//! Provides convenient builders for creating test data.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use isoaudit::adapters::{MemoryStore, MemorySummaryCache};
use isoaudit::api::{
    self, ActionStatusRequest, ApiContext, CreateActionRequest, CreateNcrRequest,
    VerifyActionRequest,
};
use isoaudit::core::models::{
    ActionStatus, CorrectiveAction, NcrStatus, NonConformity, Priority, Severity,
};
use uuid::Uuid;

/// Fixed clock used by every test context
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
}

/// An in-memory context on the fixed clock, plus a handle on its cache
pub fn test_context() -> (ApiContext, Arc<MemorySummaryCache>) {
    let cache = Arc::new(MemorySummaryCache::new());
    let ctx = ApiContext::new(Arc::new(MemoryStore::new()), cache.clone()).with_clock(fixed_now);
    (ctx, cache)
}

/// Builder for creating test non-conformities
pub struct NcrBuilder {
    title: String,
    severity: Severity,
    status: NcrStatus,
}

impl NcrBuilder {
    pub fn new() -> Self {
        Self {
            title: "Calibration records missing".to_string(),
            severity: Severity::Major,
            status: NcrStatus::Open,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn status(mut self, status: NcrStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> NonConformity {
        let mut ncr = NonConformity::new(
            self.title,
            "Found during internal audit".to_string(),
            self.severity,
            fixed_now(),
        );
        ncr.status = self.status;
        ncr
    }
}

impl Default for NcrBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating test corrective actions
pub struct ActionBuilder {
    ncr_id: Uuid,
    description: String,
    status: ActionStatus,
    target_date: Option<DateTime<Utc>>,
}

impl ActionBuilder {
    pub fn new(ncr_id: Uuid) -> Self {
        Self {
            ncr_id,
            description: "Recalibrate gauge".to_string(),
            status: ActionStatus::Pending,
            target_date: None,
        }
    }

    pub fn status(mut self, status: ActionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn due(mut self, target_date: DateTime<Utc>) -> Self {
        self.target_date = Some(target_date);
        self
    }

    pub fn build(self) -> CorrectiveAction {
        let mut action =
            CorrectiveAction::new(self.ncr_id, self.description, Priority::Medium, fixed_now());
        action.status = self.status;
        action.target_date = self.target_date;
        action
    }
}

/// Raise an NCR through the API
pub fn raise_ncr(ctx: &ApiContext, title: &str) -> NonConformity {
    api::create_ncr(
        ctx,
        &CreateNcrRequest {
            title: title.to_string(),
            description: String::new(),
            severity: Severity::Major,
            source: None,
        },
    )
    .unwrap()
}

/// Create a PENDING action through the API
pub fn add_action(ctx: &ApiContext, ncr_id: Uuid) -> CorrectiveAction {
    api::create_action(
        ctx,
        &CreateActionRequest {
            non_conformity_id: ncr_id,
            description: "Retrain operators".to_string(),
            priority: Priority::High,
            target_date: None,
            assigned_to_id: None,
        },
    )
    .unwrap()
}

/// Drive an action from PENDING to VERIFIED through the API
pub fn complete_and_verify(ctx: &ApiContext, action_id: Uuid) {
    api::update_action_status(
        ctx,
        action_id,
        ActionStatusRequest {
            status: ActionStatus::InProgress,
        },
    )
    .unwrap();
    api::update_action_status(
        ctx,
        action_id,
        ActionStatusRequest {
            status: ActionStatus::Completed,
        },
    )
    .unwrap();
    api::verify_action(
        ctx,
        action_id,
        &VerifyActionRequest {
            effectiveness_notes: "No recurrence in 30 days".to_string(),
            verified_by_id: "qa-lead".to_string(),
        },
    )
    .unwrap();
}
