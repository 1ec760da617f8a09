//! Shared state handed to every handler

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::adapters::{JsonFileStore, MemoryStore, MemorySummaryCache};
use crate::config::{ApiConfig, AppConfig};
use super::handlers::MAX_TREND_MONTHS;
use crate::core::ports::{AuditStore, NoCache, SummaryCache};

/// Store, summary cache and settings used by the handlers
#[derive(Clone)]
pub struct ApiContext {
    store: Arc<dyn AuditStore>,
    cache: Arc<dyn SummaryCache>,
    config: ApiConfig,
    trend_months: u32,
    clock: fn() -> DateTime<Utc>,
}

impl ApiContext {
    /// Build a context over an existing store and cache
    #[must_use]
    pub fn new(store: Arc<dyn AuditStore>, cache: Arc<dyn SummaryCache>) -> Self {
        Self {
            store,
            cache,
            config: ApiConfig::default(),
            trend_months: AppConfig::default().reports.trend_months,
            clock: Utc::now,
        }
    }

    /// A context over an empty in-memory store
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemorySummaryCache::new()))
    }

    /// A context over the JSON store named by `config`
    ///
    /// Summaries are not cached; use [`Self::with_cache`] for long-lived
    /// contexts.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let months = config.reports.trend_months;
        if months == 0 || months > MAX_TREND_MONTHS {
            log::warn!(
                "reports.trend_months = {months} is outside 1..={MAX_TREND_MONTHS}; clamping"
            );
        }
        let store = JsonFileStore::open(config.storage.store_file());
        Self::new(Arc::new(store), Arc::new(NoCache))
            .with_api_config(config.api)
            .with_trend_months(months)
    }

    /// Replace the summary cache
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn SummaryCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Override API settings
    #[must_use]
    pub const fn with_api_config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the default trend length, clamped to `1..=MAX_TREND_MONTHS`
    #[must_use]
    pub fn with_trend_months(mut self, months: u32) -> Self {
        self.trend_months = months.clamp(1, MAX_TREND_MONTHS);
        self
    }

    /// Override the clock
    #[must_use]
    pub const fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// The store
    #[must_use]
    pub fn store(&self) -> &dyn AuditStore {
        self.store.as_ref()
    }

    /// The summary cache
    #[must_use]
    pub fn cache(&self) -> &dyn SummaryCache {
        self.cache.as_ref()
    }

    /// API settings
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Default trend length in months
    #[must_use]
    pub const fn trend_months(&self) -> u32 {
        self.trend_months
    }

    /// Current time
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

impl fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext")
            .field("config", &self.config)
            .field("trend_months", &self.trend_months)
            .finish_non_exhaustive()
    }
}
