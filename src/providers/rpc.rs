//! RPC Client Module
//!
//! Minimal JSON-RPC over HTTP for the registry node. A failed call is
//! returned to the caller as-is; nothing here retries.

use eyre::{eyre, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::utils::constants::USER_AGENT as USER_AGENT_CONST;

/// JSON-RPC response envelope
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// HTTP JSON-RPC provider
#[derive(Clone)]
pub struct RpcProvider {
    url: String,
    client: reqwest::Client,
}

impl RpcProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        if url.is_empty() {
            return Err(eyre!("RPC URL is empty"));
        }

        Ok(Self {
            url,
            client: Self::build_client(timeout)?,
        })
    }

    fn build_client(timeout: Duration) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
    }

    /// Execute one JSON-RPC call
    pub async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        debug!(method, "📡 RPC call");

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    eyre!("Request timed out: {}", e)
                } else {
                    eyre!("Request failed: {}", e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(eyre!("HTTP error: {}", status));
        }

        let json: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| eyre!("Failed to parse response: {}", e))?;

        if let Some(error) = json.error {
            return Err(eyre!("RPC error: {} (code: {})", error.message, error.code));
        }

        json.result.ok_or_else(|| eyre!("No result in response"))
    }

    /// `eth_call` against the latest block
    pub async fn eth_call(&self, to: &str, data: &str) -> Result<String> {
        let params = serde_json::json!([{ "to": to, "data": data }, "latest"]);
        self.call::<String>("eth_call", params).await
    }

    pub async fn get_code(&self, address: &str) -> Result<String> {
        let params = serde_json::json!([address, "latest"]);
        self.call::<String>("eth_getCode", params).await
    }

    /// Balance in wei, hex-encoded
    pub async fn get_balance(&self, address: &str) -> Result<String> {
        let params = serde_json::json!([address, "latest"]);
        self.call::<String>("eth_getBalance", params).await
    }

    /// Nonce, hex-encoded
    pub async fn get_transaction_count(&self, address: &str) -> Result<String> {
        let params = serde_json::json!([address, "latest"]);
        self.call::<String>("eth_getTransactionCount", params).await
    }

    /// RPC URL with any path credentials hidden
    pub fn masked_url(&self) -> String {
        match self.url.split_once("://") {
            Some((scheme, rest)) => match rest.split_once('/') {
                Some((host, path)) if !path.is_empty() => format!("{}://{}/***HIDDEN***", scheme, host),
                _ => self.url.clone(),
            },
            None => self.url.clone(),
        }
    }
}
