//! In-memory registry used by unit tests

use alloy_primitives::Address;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::chain::{ActivitySource, ChainClient};
use crate::core::normalizer::{RawFlag, RawReason, RawReport, RawTime};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{AddressActivity, AddressCheck};

#[derive(Default)]
pub struct MockChain {
    pub reports: Mutex<HashMap<u64, RawReport>>,
    pub flagged: Mutex<HashMap<Address, AddressCheck>>,
    pub scores: Mutex<HashMap<Address, u64>>,
    pub activity: Mutex<Option<AddressActivity>>,
    pub resolvable: Mutex<HashMap<(u64, bool), bool>>,
    pub fail_reports: Mutex<bool>,
    pub check_calls: AtomicUsize,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(self, id: u64, raw: RawReport) -> Self {
        self.reports.lock().unwrap().insert(id, raw);
        self
    }

    pub fn with_check(self, address: Address, check: AddressCheck, score: u64) -> Self {
        self.flagged.lock().unwrap().insert(address, check);
        self.scores.lock().unwrap().insert(address, score);
        self
    }

    pub fn with_activity(self, activity: AddressActivity) -> Self {
        *self.activity.lock().unwrap() = Some(activity);
        self
    }

    pub fn with_resolvable(self, id: u64, malicious: bool, allowed: bool) -> Self {
        self.resolvable.lock().unwrap().insert((id, malicious), allowed);
        self
    }

    pub fn failing_reports(self) -> Self {
        *self.fail_reports.lock().unwrap() = true;
        self
    }

    pub fn check_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }
}

/// Chain-shaped raw tuple
pub fn chain_report(target: &str, seconds: u64, upvotes: u64, resolved: bool) -> RawReport {
    RawReport {
        reporter: Some("0x742d35Cc6634C0532925a3b844Bc454e4438f44e".to_string()),
        target_address: Some(target.to_string()),
        name_tag: Some(String::new()),
        reason: RawReason::Code(0),
        evidence: Some("cloned interface".to_string()),
        timestamp: RawTime::Seconds(seconds),
        upvotes,
        downvotes: 0,
        resolved: RawFlag::Bool(resolved),
        malicious: RawFlag::Bool(false),
        ..Default::default()
    }
}

#[async_trait]
impl ActivitySource for MockChain {
    async fn activity(&self, _address: Address) -> AppResult<AddressActivity> {
        let activity = *self.activity.lock().unwrap();
        activity.ok_or_else(|| AppError::rpc_connection_failed("activity unavailable"))
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn check_address(&self, address: Address) -> AppResult<AddressCheck> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.flagged.lock().unwrap().get(&address).cloned().unwrap_or_default())
    }

    async fn risk_score(&self, address: Address) -> AppResult<u64> {
        Ok(self.scores.lock().unwrap().get(&address).copied().unwrap_or(0))
    }

    async fn report(&self, id: u64) -> AppResult<RawReport> {
        if *self.fail_reports.lock().unwrap() {
            return Err(AppError::rpc_error("execution reverted"));
        }
        self.reports
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::rpc_error("execution reverted"))
    }

    async fn report_count(&self) -> AppResult<u64> {
        Ok(self.reports.lock().unwrap().len() as u64)
    }

    async fn can_resolve(&self, id: u64, malicious: bool) -> AppResult<bool> {
        Ok(self.resolvable.lock().unwrap().get(&(id, malicious)).copied().unwrap_or(false))
    }
}
