//! Backing source selection
//!
//! Chain availability is decided once, at startup, and carried as an
//! explicit variant instead of optional clients checked at every call site.

use std::sync::Arc;
use tracing::info;

use super::chain::ChainClient;
use super::demo::DemoReportStore;
use super::registry::RegistryClient;
use crate::models::config::AppConfig;
use crate::models::errors::AppResult;
use crate::models::types::Mode;

#[derive(Clone)]
pub enum ReportSource {
    /// Authoritative on-chain registry
    Onchain(Arc<dyn ChainClient>),
    /// Static fallback reports
    Demo(Arc<DemoReportStore>),
}

impl ReportSource {
    /// Registry when configured, otherwise the seeded demo set
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        match RegistryClient::from_config(config)? {
            Some(client) => Ok(Self::Onchain(Arc::new(client))),
            None => {
                info!("🧪 No registry configured, serving demo reports");
                let now_ms = chrono::Utc::now().timestamp_millis();
                Ok(Self::Demo(Arc::new(DemoReportStore::seeded(now_ms))))
            }
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Onchain(_) => Mode::Onchain,
            Self::Demo(_) => Mode::Demo,
        }
    }

    pub fn chain(&self) -> Option<&dyn ChainClient> {
        match self {
            Self::Onchain(client) => Some(client.as_ref()),
            Self::Demo(_) => None,
        }
    }
}
