//! Command implementations
//!
//! Every command goes through the same API handlers the HTTP server uses.

mod action;
mod assessment;
mod init;
mod ncr;
mod report;
mod serve;

use std::path::PathBuf;

use isoaudit::api::{ApiContext, PageRequest};
use isoaudit::config::AppConfig;
use isoaudit::output::OutputMode;

pub use action::action_cmd;
pub use assessment::assessment_cmd;
pub use init::init;
pub use ncr::ncr_cmd;
pub use report::{dashboard, standard, templates, trend, workflow};
pub use serve::serve;

use crate::cli::PageArgs;

/// Resolved configuration, store and output mode for one invocation
#[derive(Debug)]
pub struct Session {
    /// Effective configuration
    pub config: AppConfig,
    /// Where the configuration came from
    pub config_path: Option<PathBuf>,
    /// Handler context over the configured store
    pub ctx: ApiContext,
    /// Output mode
    pub mode: OutputMode,
}

impl Session {
    /// Load configuration and open the store
    pub fn open(data_dir: Option<PathBuf>, mode: OutputMode) -> anyhow::Result<Self> {
        let (mut config, config_path) = AppConfig::discover()?;
        if let Some(dir) = data_dir {
            config.storage.data_dir = dir;
        }
        log::debug!("Using store {}", config.storage.store_file().display());

        Ok(Self {
            ctx: ApiContext::from_config(&config),
            config,
            config_path,
            mode,
        })
    }
}

impl From<PageArgs> for PageRequest {
    fn from(args: PageArgs) -> Self {
        Self {
            page: args.page,
            page_size: args.page_size,
        }
    }
}
