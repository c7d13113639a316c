//! Configuration module
//!
//! Deployment settings read from the environment. Unparseable numbers fall
//! back to their defaults.

use alloy_primitives::Address;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::models::types::Mode;
use crate::utils::constants::{
    parse_address, DEFAULT_CACHE_TTL_SECS, DEFAULT_CHAIN_NAME, DEFAULT_CHAIN_SYMBOL,
    DEFAULT_PORT, DEFAULT_RPC_TIMEOUT_SECS,
};

/// Allowed CORS origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigin {
    Any,
    List(Vec<String>),
}

impl CorsOrigin {
    /// A `*` anywhere in the list allows every origin
    fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: CorsOrigin,
    pub chain_name: String,
    pub chain_id: u64,
    pub chain_currency_symbol: String,
    pub chain_explorer_url: String,
    pub rpc_url: String,
    pub contract_address: String,
    pub rpc_timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            cors_origin: CorsOrigin::Any,
            chain_name: DEFAULT_CHAIN_NAME.to_string(),
            chain_id: 0,
            chain_currency_symbol: DEFAULT_CHAIN_SYMBOL.to_string(),
            chain_explorer_url: String::new(),
            rpc_url: String::new(),
            contract_address: String::new(),
            rpc_timeout: Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, fallback: String| lookup(key).unwrap_or(fallback);
        let number = |key: &str, fallback: u64| -> u64 {
            match lookup(key) {
                Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    warn!("⚠️ {} is not a valid number, using default {}", key, fallback);
                    fallback
                }),
                None => fallback,
            }
        };

        let port = number("PORT", defaults.port as u64);
        let port = u16::try_from(port).unwrap_or(defaults.port);

        let config = Self {
            host: text("HOST", defaults.host),
            port,
            cors_origin: lookup("CORS_ORIGIN")
                .map(|raw| CorsOrigin::parse(&raw))
                .unwrap_or(CorsOrigin::Any),
            chain_name: text("CHAIN_NAME", defaults.chain_name),
            chain_id: number("CHAIN_ID", defaults.chain_id),
            chain_currency_symbol: text("CHAIN_CURRENCY_SYMBOL", defaults.chain_currency_symbol),
            chain_explorer_url: text("CHAIN_EXPLORER_URL", defaults.chain_explorer_url),
            rpc_url: text("RPC_URL", defaults.rpc_url).trim().to_string(),
            contract_address: text("CONTRACT_ADDRESS", defaults.contract_address)
                .trim()
                .to_string(),
            rpc_timeout: Duration::from_secs(number("RPC_TIMEOUT_SECS", DEFAULT_RPC_TIMEOUT_SECS)),
            cache_ttl: Duration::from_secs(number("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)),
        };

        if config.rpc_url.is_empty() != config.contract_address.is_empty() {
            warn!("⚠️ RPC_URL and CONTRACT_ADDRESS must both be set for on-chain mode");
        }
        info!("⚙️ Configured for {} (mode: {})", config.chain_name, config.mode().as_str());
        config
    }

    /// Registry address, when chain mode is usable
    pub fn registry_address(&self) -> Option<Address> {
        if self.rpc_url.is_empty() {
            return None;
        }
        parse_address(&self.contract_address)
    }

    pub fn is_chain_mode_enabled(&self) -> bool {
        self.registry_address().is_some()
    }

    pub fn mode(&self) -> Mode {
        if self.is_chain_mode_enabled() {
            Mode::Onchain
        } else {
            Mode::Demo
        }
    }

    /// Public chain description served by the config endpoint
    pub fn chain_info(&self) -> ChainInfo {
        ChainInfo {
            chain_name: self.chain_name.clone(),
            chain_id: self.chain_id,
            chain_currency_symbol: self.chain_currency_symbol.clone(),
            chain_explorer_url: self.chain_explorer_url.clone(),
            contract_address: self.contract_address.clone(),
            mode: self.mode(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_name: String,
    pub chain_id: u64,
    pub chain_currency_symbol: String,
    pub chain_explorer_url: String,
    pub contract_address: String,
    pub mode: Mode,
}
