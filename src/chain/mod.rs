//! Capabilities the testkit borrows from a running chain.
//!
//! Everything that touches a node goes through these traits so the
//! derivation and digest code stays pure. [`provider::EthersChain`] backs the
//! read-only and dev-RPC ones with an ethers provider; deployment and
//! factory calls are left to the caller's harness.

use async_trait::async_trait;
use ethers::abi::Token;
use serde::{Deserialize, Serialize};

use crate::models::artifact::Artifact;
use crate::models::types::{Address, Hash};

pub mod provider;
pub mod time;

/// Gas limit the pair fixtures force on every deployment.
pub const FIXTURE_GAS_LIMIT: u64 = 9_999_999_999;

/// Dev-node controls (Hardhat / Ganache style).
#[async_trait]
pub trait ChainSimulator: Send + Sync {
    /// `evm_mine`
    async fn mine_block(&self) -> anyhow::Result<()>;

    /// `evm_increaseTime`. Negative values are passed to the node as-is.
    async fn increase_time(&self, seconds: i64) -> anyhow::Result<()>;

    /// Timestamp of the latest block.
    async fn latest_timestamp(&self) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait TokenMetadata: Send + Sync {
    /// ERC-20 `name()`
    async fn name(&self, token: Address) -> anyhow::Result<String>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOptions {
    pub gas_limit: u64,
}

impl Default for DeployOptions {
    fn default() -> Self {
        DeployOptions { gas_limit: FIXTURE_GAS_LIMIT }
    }
}

/// Result of deploying a contract.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    /// keccak256 of the creation code that was sent.
    pub init_code_hash: Hash,
}

#[async_trait]
pub trait Deployer: Send + Sync {
    /// Deploys `artifact` from `from` with ABI-encoded constructor `args`.
    async fn deploy(
        &self,
        from: Address,
        artifact: &Artifact,
        args: Vec<Token>,
        options: &DeployOptions,
    ) -> anyhow::Result<Deployment>;
}

/// The pair-factory calls the fixtures make.
#[async_trait]
pub trait PairFactoryClient: Send + Sync {
    async fn create_pair(
        &self,
        from: Address,
        factory: Address,
        token_a: Address,
        token_b: Address,
        options: &DeployOptions,
    ) -> anyhow::Result<()>;

    async fn get_pair(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
    ) -> anyhow::Result<Address>;

    /// `token0()` of a deployed pair.
    async fn token0(&self, pair: Address) -> anyhow::Result<Address>;
}
