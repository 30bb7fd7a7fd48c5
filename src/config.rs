use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::chain::{DeployOptions, FIXTURE_GAS_LIMIT};
use crate::eip712::{Eip712Domain, LEGACY_CHAIN_ID};
use crate::error::{Error, Result};
use crate::models::types::Address;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Where the dev node lives and what the fixtures assume about it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub rpc_url: String,
    /// Chain id baked into permit domains.
    pub chain_id: u64,
    pub deploy_gas_limit: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: LEGACY_CHAIN_ID,
            deploy_gas_limit: FIXTURE_GAS_LIMIT,
        }
    }
}

impl HarnessConfig {
    /// Reads `RPC_URL`, `CHAIN_ID` and `DEPLOY_GAS_LIMIT`, after loading `.env`
    /// if there is one. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = HarnessConfig::default();
        let config = HarnessConfig {
            rpc_url: lookup("RPC_URL").unwrap_or(defaults.rpc_url),
            chain_id: parse_var(&lookup, "CHAIN_ID")?.unwrap_or(defaults.chain_id),
            deploy_gas_limit: parse_var(&lookup, "DEPLOY_GAS_LIMIT")?
                .unwrap_or(defaults.deploy_gas_limit),
        };
        log::debug!("harness config: {:?}", config);
        Ok(config)
    }

    pub fn deploy_options(&self) -> DeployOptions {
        DeployOptions { gas_limit: self.deploy_gas_limit }
    }

    /// Permit domain for a token on the configured chain.
    pub fn permit_domain(&self, name: impl Into<String>, token: Address) -> Eip712Domain {
        Eip712Domain::new(name, self.chain_id, token)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("{}={:?}: {}", key, raw, e))),
    }
}
