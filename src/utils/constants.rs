//! Constants Module - Single Source of Truth
//!
//! Fixed values shared across the pipeline, transport and configuration.

use alloy_primitives::Address;
use std::str::FromStr;

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "X1 Sentinel API";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for JSON-RPC requests
pub const USER_AGENT: &str = "X1Sentinel/0.1.0";

// ============================================
// RPC CONSTANTS
// ============================================

/// Default timeout for RPC requests (seconds)
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;

// ============================================
// CACHE CONSTANTS
// ============================================

/// Evaluation cache TTL (seconds)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Maximum cached evaluations before eviction kicks in
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

/// Interval of the background purge of expired entries (seconds)
pub const CACHE_CLEANUP_INTERVAL_SECS: u64 = 60;

/// Namespace tag prepended to evaluation cache keys
pub const CHECK_CACHE_NAMESPACE: &str = "check:";

// ============================================
// REPORT CONSTANTS
// ============================================

/// Sentinel for "not resolved by anyone"
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Default page size for report listings
pub const DEFAULT_PAGE_LIMIT: u64 = 20;

/// Minimum trimmed evidence length for a submission
pub const MIN_EVIDENCE_LEN: usize = 10;

/// Unresolved reports need this many upvotes to flag an address
pub const FLAG_UPVOTE_THRESHOLD: u64 = 3;

// ============================================
// CHAIN DEFAULTS
// ============================================

pub const DEFAULT_CHAIN_NAME: &str = "X1 EcoChain";
pub const DEFAULT_CHAIN_SYMBOL: &str = "X1";
pub const DEFAULT_PORT: u16 = 4010;

// ============================================
// HELPER FUNCTIONS
// ============================================

/// Parse a `0x`-prefixed 20-byte account address
pub fn parse_address(value: &str) -> Option<Address> {
    let value = value.trim();
    if value.len() != 42 || !(value.starts_with("0x") || value.starts_with("0X")) {
        return None;
    }
    if !value[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Address::from_str(&value[2..]).ok()
}

/// True when `value` is a syntactically valid account address
#[inline]
pub fn is_valid_address(value: &str) -> bool {
    parse_address(value).is_some()
}
