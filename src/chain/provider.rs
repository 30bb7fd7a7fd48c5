// chain/provider.rs
use async_trait::async_trait;
use ethers::abi::{self, ParamType};
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{BlockNumber, TransactionRequest};
use serde_json::Value;

use crate::chain::{ChainSimulator, TokenMetadata};
use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use crate::models::types::Address;

/// 4-byte selector of `name()`.
const NAME_SELECTOR: [u8; 4] = [0x06, 0xfd, 0xde, 0x03];

/// An ethers JSON-RPC provider pointed at a dev node.
#[derive(Debug, Clone)]
pub struct EthersChain {
    provider: Provider<Http>,
}

impl EthersChain {
    pub fn new(provider: Provider<Http>) -> Self {
        EthersChain { provider }
    }

    pub fn provider(&self) -> &Provider<Http> {
        &self.provider
    }
}

pub fn connect(config: &HarnessConfig) -> Result<EthersChain> {
    let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
        .map_err(|e| Error::Config(format!("RPC_URL {:?}: {}", config.rpc_url, e)))?;
    log::info!("using chain at {}", config.rpc_url);
    Ok(EthersChain::new(provider))
}

#[async_trait]
impl ChainSimulator for EthersChain {
    async fn mine_block(&self) -> anyhow::Result<()> {
        let _: Value = self.provider.request("evm_mine", Vec::<Value>::new()).await?;
        Ok(())
    }

    async fn increase_time(&self, seconds: i64) -> anyhow::Result<()> {
        let _: Value = self.provider.request("evm_increaseTime", [seconds]).await?;
        Ok(())
    }

    async fn latest_timestamp(&self) -> anyhow::Result<u64> {
        let block = self
            .provider
            .get_block(BlockNumber::Latest)
            .await?
            .ok_or_else(|| anyhow::anyhow!("node returned no latest block"))?;
        Ok(block.timestamp.as_u64())
    }
}

#[async_trait]
impl TokenMetadata for EthersChain {
    async fn name(&self, token: Address) -> anyhow::Result<String> {
        let call = TransactionRequest::new().to(token).data(NAME_SELECTOR.to_vec());
        let output = self.provider.call(&call.into(), None).await?;

        abi::decode(&[ParamType::String], &output)?
            .into_iter()
            .next()
            .and_then(|token| token.into_string())
            .ok_or_else(|| anyhow::anyhow!("name() of {:?} did not return a string", token))
    }
}
