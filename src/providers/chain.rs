//! Chain client seams
//!
//! The orchestrator never talks to a node directly; it receives an
//! implementation of [`ChainClient`] (or none, in demo mode).

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::core::normalizer::RawReport;
use crate::models::errors::AppResult;
use crate::models::types::{AddressActivity, AddressCheck};

/// Source of on-chain activity signals for the privacy score
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn activity(&self, address: Address) -> AppResult<AddressActivity>;
}

/// Read access to the safety registry contract
#[async_trait]
pub trait ChainClient: ActivitySource {
    /// Flag state and ids of every report filed against `address`
    async fn check_address(&self, address: Address) -> AppResult<AddressCheck>;

    /// Registry-computed risk score
    async fn risk_score(&self, address: Address) -> AppResult<u64>;

    /// Raw report tuple for `id`
    async fn report(&self, id: u64) -> AppResult<RawReport>;

    /// Total number of reports ever filed
    async fn report_count(&self) -> AppResult<u64>;

    /// Registry-side eligibility of a resolution in the given direction
    async fn can_resolve(&self, id: u64, malicious: bool) -> AppResult<bool>;
}
