//! Safety Registry Client
//!
//! Reads the on-chain safety registry through plain `eth_call`s. Calls are
//! ABI-encoded with `sol!` bindings; activity signals come from the
//! standard account RPC methods.

use alloy_primitives::{utils::format_ether, Address, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use tracing::{debug, info};

use super::chain::{ActivitySource, ChainClient};
use super::rpc::RpcProvider;
use crate::core::normalizer::{RawFlag, RawReason, RawReport, RawTime};
use crate::models::config::AppConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::{AddressActivity, AddressCheck};

// Safety registry interface
sol! {
    function checkAddress(address _address) external view returns (bool isFlagged, uint256[] memory reportIds);

    function calculateRiskScore(address _address) external view returns (uint256 score);

    function reports(uint256 _reportId) external view returns (
        address reporter,
        address targetAddress,
        string nameTag,
        uint8 reason,
        string evidence,
        uint256 timestamp,
        uint256 upvotes,
        uint256 downvotes,
        bool resolved,
        bool malicious,
        address resolvedBy,
        uint256 resolvedAt
    );

    function reportCount() external view returns (uint256);

    function canResolve(uint256 _reportId, bool _malicious) external view returns (bool);
}

impl From<reportsReturn> for RawReport {
    fn from(tuple: reportsReturn) -> Self {
        Self {
            reporter: Some(tuple.reporter.to_string()),
            target_address: Some(tuple.targetAddress.to_string()),
            name_tag: Some(tuple.nameTag),
            ens_name: None,
            reason: RawReason::Code(u64::from(tuple.reason)),
            evidence: Some(tuple.evidence),
            timestamp: RawTime::Seconds(tuple.timestamp.saturating_to::<u64>()),
            upvotes: tuple.upvotes.saturating_to::<u64>(),
            downvotes: tuple.downvotes.saturating_to::<u64>(),
            resolved: RawFlag::Bool(tuple.resolved),
            malicious: RawFlag::Bool(tuple.malicious),
            resolved_by: Some(tuple.resolvedBy.to_string()),
            resolved_at: RawTime::Seconds(tuple.resolvedAt.saturating_to::<u64>()),
        }
    }
}

fn decode_hex(raw: &str) -> AppResult<Vec<u8>> {
    let digits = raw.trim().trim_start_matches("0x");
    hex::decode(digits).map_err(|e| AppError::rpc_invalid_response(format!("Invalid hex data: {}", e)))
}

fn parse_quantity(raw: &str) -> AppResult<U256> {
    let digits = raw.trim().trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| AppError::rpc_invalid_response(format!("Invalid quantity {}: {}", raw, e)))
}

/// Wei -> native-currency units
fn wei_to_native(wei: U256) -> f64 {
    format_ether(wei).parse().unwrap_or(0.0)
}

/// JSON-RPC backed registry client
#[derive(Clone)]
pub struct RegistryClient {
    rpc: RpcProvider,
    contract: Address,
}

impl RegistryClient {
    pub fn new(rpc: RpcProvider, contract: Address) -> Self {
        Self { rpc, contract }
    }

    /// Client for the configured registry, if chain mode is enabled
    pub fn from_config(config: &AppConfig) -> AppResult<Option<Self>> {
        let Some(contract) = config.registry_address() else {
            return Ok(None);
        };

        let rpc = RpcProvider::new(config.rpc_url.clone(), config.rpc_timeout)
            .map_err(|e| AppError::new(ErrorCode::ConfigInvalidValue, e.to_string()))?;
        info!("✅ Registry {} via {}", contract, rpc.masked_url());
        Ok(Some(Self::new(rpc, contract)))
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    async fn view<C: SolCall + Send>(&self, call: C) -> AppResult<C::Return> {
        let data = format!("0x{}", hex::encode(call.abi_encode()));
        let raw = self.rpc.eth_call(&self.contract.to_string(), &data).await?;
        let bytes = decode_hex(&raw)?;
        C::abi_decode_returns(&bytes, true).map_err(|e| {
            AppError::rpc_invalid_response(format!("Failed to decode {}: {}", C::SIGNATURE, e))
        })
    }
}

#[async_trait]
impl ActivitySource for RegistryClient {
    async fn activity(&self, address: Address) -> AppResult<AddressActivity> {
        let target = address.to_string();
        let (nonce, balance, code) = tokio::try_join!(
            self.rpc.get_transaction_count(&target),
            self.rpc.get_balance(&target),
            self.rpc.get_code(&target),
        )?;

        let activity = AddressActivity {
            transaction_count: parse_quantity(&nonce)?.saturating_to::<u64>(),
            balance: wei_to_native(parse_quantity(&balance)?),
            is_contract: !code.trim().trim_start_matches("0x").is_empty(),
        };
        debug!(address = %target, ?activity, "📊 Activity fetched");
        Ok(activity)
    }
}

#[async_trait]
impl ChainClient for RegistryClient {
    async fn check_address(&self, address: Address) -> AppResult<AddressCheck> {
        let result = self.view(checkAddressCall { _address: address }).await?;
        Ok(AddressCheck {
            is_flagged: result.isFlagged,
            report_ids: result
                .reportIds
                .into_iter()
                .map(|id| id.saturating_to::<u64>())
                .collect(),
        })
    }

    async fn risk_score(&self, address: Address) -> AppResult<u64> {
        let result = self.view(calculateRiskScoreCall { _address: address }).await?;
        Ok(result.score.saturating_to::<u64>())
    }

    async fn report(&self, id: u64) -> AppResult<RawReport> {
        let result = self.view(reportsCall { _reportId: U256::from(id) }).await?;
        Ok(result.into())
    }

    async fn report_count(&self) -> AppResult<u64> {
        let result = self.view(reportCountCall {}).await?;
        Ok(result._0.saturating_to::<u64>())
    }

    async fn can_resolve(&self, id: u64, malicious: bool) -> AppResult<bool> {
        let result = self
            .view(canResolveCall {
                _reportId: U256::from(id),
                _malicious: malicious,
            })
            .await?;
        Ok(result._0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalizer::normalize_report;
    use crate::models::types::ReportReason;
    use crate::utils::constants::parse_address;

    #[test]
    fn test_tuple_to_raw_report() {
        let target = parse_address("0x22222222222A7f2f2D0efA7D2A6fD6b88E59f6a9").unwrap();
        let tuple = reportsReturn {
            reporter: Address::ZERO,
            targetAddress: target,
            nameTag: "fake-airdrop".to_string(),
            reason: 9,
            evidence: "Airdrop page drains balances".to_string(),
            timestamp: U256::from(1_700_000_000u64),
            upvotes: U256::from(5u64),
            downvotes: U256::ZERO,
            resolved: false,
            malicious: false,
            resolvedBy: Address::ZERO,
            resolvedAt: U256::ZERO,
        };

        let report = normalize_report(1, &RawReport::from(tuple));
        assert_eq!(report.reason, ReportReason::Other);
        assert_eq!(report.timestamp, 1_700_000_000_000);
        assert_eq!(report.upvotes, 5);
        assert_eq!(report.name_tag.as_deref(), Some("fake-airdrop"));
        assert_eq!(report.target_address.to_lowercase(), "0x22222222222a7f2f2d0efa7d2a6fd6b88e59f6a9");
        assert_eq!(report.resolved_at, 0);
    }

    #[test]
    fn test_quantity_parsing() {
        assert_eq!(parse_quantity("0x10").unwrap(), U256::from(16u64));
        assert_eq!(parse_quantity("0x").unwrap(), U256::ZERO);
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn test_wei_to_native() {
        let one_and_half = U256::from(1_500_000_000_000_000_000u128);
        assert!((wei_to_native(one_and_half) - 1.5).abs() < f64::EPSILON);
        assert_eq!(wei_to_native(U256::ZERO), 0.0);
    }

    #[test]
    fn test_config_without_chain_gives_no_client() {
        let config = AppConfig::default();
        assert!(RegistryClient::from_config(&config).unwrap().is_none());
    }
}
