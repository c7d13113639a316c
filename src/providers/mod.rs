//! Providers Module - Report Sources
//!
//! JSON-RPC client, the on-chain registry binding and the demo store.

pub mod chain;
pub mod demo;
pub mod registry;
pub mod rpc;
pub mod source;

#[cfg(test)]
pub(crate) mod mock;

pub use chain::{ActivitySource, ChainClient};
pub use demo::DemoReportStore;
pub use registry::RegistryClient;
pub use rpc::RpcProvider;
pub use source::ReportSource;
