//! External Flag Aggregator
//!
//! Third-party scam lists plug in as [`FlagSource`]s. No list is wired up
//! yet, so the default aggregator always reports zero flags.

use alloy_primitives::Address;
use async_trait::async_trait;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::warn;

use crate::models::errors::AppResult;
use crate::models::types::{ExternalFlagSource, ExternalFlags};

/// One third-party scam list
#[async_trait]
pub trait FlagSource: Send + Sync {
    fn name(&self) -> &str;

    async fn query(&self, address: Address) -> AppResult<ExternalFlagSource>;
}

#[derive(Clone, Default)]
pub struct ExternalFlagAggregator {
    sources: Vec<Arc<dyn FlagSource>>,
}

impl ExternalFlagAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: Arc<dyn FlagSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Query every source concurrently and merge the verdicts in source order.
    /// A source that errors is left out of the merge.
    pub async fn aggregate(&self, address: Address) -> ExternalFlags {
        if self.sources.is_empty() {
            return ExternalFlags::default();
        }

        let results = join_all(self.sources.iter().map(|source| source.query(address))).await;

        let verdicts = self
            .sources
            .iter()
            .zip(results)
            .filter_map(|(source, result)| match result {
                Ok(verdict) => Some(verdict),
                Err(e) => {
                    warn!("⚠️ Scam list {} failed for {}: {}", source.name(), address, e);
                    None
                }
            })
            .collect();

        ExternalFlags::from_sources(verdicts)
    }
}
