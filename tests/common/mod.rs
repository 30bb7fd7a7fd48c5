// Shared in-memory chain for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use ethers::abi::{self, Token};
use ethers::utils::{get_contract_address, get_create2_address_from_hash, keccak256};
use std::collections::HashMap;
use std::sync::Mutex;

use pair_factory_testkit::chain::{
    ChainSimulator, DeployOptions, Deployer, Deployment, PairFactoryClient, TokenMetadata,
};
use pair_factory_testkit::models::artifact::{Artifact, FixtureArtifacts};
use pair_factory_testkit::{Address, Hash};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn artifact(name: &str, bytecode: &str) -> Artifact {
    Artifact::from_json(&format!(
        r#"{{ "contractName": "{}", "abi": [], "bytecode": "{}" }}"#,
        name, bytecode
    ))
    .unwrap()
}

pub fn fixture_artifacts() -> FixtureArtifacts {
    FixtureArtifacts {
        factory: artifact("PegasysFactory", "0x60806040526001"),
        pair: artifact("PegasysPair", "0x6080604052348015600f57600080fd5b50"),
        erc20: artifact("ERC20", "0x60806040526002"),
    }
}

#[derive(Default)]
struct State {
    nonces: HashMap<Address, u64>,
    timestamp: u64,
    pending_shift: i64,
    calls: Vec<String>,
    names: HashMap<Address, String>,
    pairs: HashMap<(Address, Address), Address>,
    token0: HashMap<Address, Address>,
}

/// A dev chain that keeps everything in memory.
///
/// Its factory creates pairs with CREATE2 over `pair_init_code_hash`, computed
/// with ethers' own helpers so tests compare against an independent path.
pub struct MockChain {
    state: Mutex<State>,
    pair_init_code_hash: Hash,
    failing: Option<&'static str>,
}

impl MockChain {
    pub fn new(pair_init_code_hash: Hash) -> Self {
        MockChain {
            state: Mutex::new(State { timestamp: 1_000, ..State::default() }),
            pair_init_code_hash,
            failing: None,
        }
    }

    /// Every call named `operation` fails.
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing = Some(operation);
        self
    }

    pub fn with_token_name(self, token: Address, name: &str) -> Self {
        self.state.lock().unwrap().names.insert(token, name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn timestamp(&self) -> u64 {
        self.state.lock().unwrap().timestamp
    }

    fn record(&self, call: String, operation: &'static str) -> anyhow::Result<()> {
        self.state.lock().unwrap().calls.push(call);
        if self.failing == Some(operation) {
            anyhow::bail!("{} reverted", operation);
        }
        Ok(())
    }
}

#[async_trait]
impl ChainSimulator for MockChain {
    async fn mine_block(&self) -> anyhow::Result<()> {
        self.record("evm_mine".to_string(), "evm_mine")?;
        let mut state = self.state.lock().unwrap();
        let next = state.timestamp as i64 + 1 + state.pending_shift;
        state.timestamp = u64::try_from(next)?;
        state.pending_shift = 0;
        Ok(())
    }

    async fn increase_time(&self, seconds: i64) -> anyhow::Result<()> {
        self.record(format!("evm_increaseTime({})", seconds), "evm_increaseTime")?;
        self.state.lock().unwrap().pending_shift += seconds;
        Ok(())
    }

    async fn latest_timestamp(&self) -> anyhow::Result<u64> {
        self.record("latest_timestamp".to_string(), "latest_timestamp")?;
        Ok(self.timestamp())
    }
}

#[async_trait]
impl TokenMetadata for MockChain {
    async fn name(&self, token: Address) -> anyhow::Result<String> {
        self.record(format!("name({:?})", token), "name")?;
        self.state
            .lock()
            .unwrap()
            .names
            .get(&token)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("execution reverted"))
    }
}

#[async_trait]
impl Deployer for MockChain {
    async fn deploy(
        &self,
        from: Address,
        artifact: &Artifact,
        args: Vec<Token>,
        _options: &DeployOptions,
    ) -> anyhow::Result<Deployment> {
        self.record(format!("deploy({})", artifact.contract_name), "deploy")?;

        let mut state = self.state.lock().unwrap();
        let nonce = state.nonces.entry(from).or_insert(0);
        let address = get_contract_address(from, *nonce);
        *nonce += 1;

        let mut init_code = artifact.bytecode.to_vec();
        init_code.extend(abi::encode(&args));
        Ok(Deployment { address, init_code_hash: Hash::from(keccak256(init_code)) })
    }
}

#[async_trait]
impl PairFactoryClient for MockChain {
    async fn create_pair(
        &self,
        _from: Address,
        factory: Address,
        token_a: Address,
        token_b: Address,
        _options: &DeployOptions,
    ) -> anyhow::Result<()> {
        self.record("createPair".to_string(), "createPair")?;
        anyhow::ensure!(token_a != token_b, "IDENTICAL_ADDRESSES");

        let (token0, token1) = if token_a < token_b { (token_a, token_b) } else { (token_b, token_a) };
        let mut state = self.state.lock().unwrap();
        anyhow::ensure!(!state.pairs.contains_key(&(token0, token1)), "PAIR_EXISTS");

        let salt = keccak256([token0.as_bytes(), token1.as_bytes()].concat());
        let pair = get_create2_address_from_hash(factory, salt, self.pair_init_code_hash);
        state.pairs.insert((token0, token1), pair);
        state.token0.insert(pair, token0);
        Ok(())
    }

    async fn get_pair(
        &self,
        _factory: Address,
        token_a: Address,
        token_b: Address,
    ) -> anyhow::Result<Address> {
        self.record("getPair".to_string(), "getPair")?;
        let key = if token_a < token_b { (token_a, token_b) } else { (token_b, token_a) };
        Ok(self.state.lock().unwrap().pairs.get(&key).copied().unwrap_or_default())
    }

    async fn token0(&self, pair: Address) -> anyhow::Result<Address> {
        self.record("token0".to_string(), "token0")?;
        self.state
            .lock()
            .unwrap()
            .token0
            .get(&pair)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no pair at {:?}", pair))
    }
}
