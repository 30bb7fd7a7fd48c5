use ethers::abi::Token;
use serde::{Deserialize, Serialize};

use crate::chain::{DeployOptions, Deployer, PairFactoryClient};
use crate::error::{Error, Result};
use crate::models::artifact::FixtureArtifacts;
use crate::models::token_pair::TokenPair;
use crate::models::types::Address;
use crate::services::create2::derive_address;
use crate::services::scale::expand_to_18_decimals;

/// Whole tokens minted to the wallet by each fixture ERC-20.
pub const FIXTURE_TOKEN_SUPPLY: u64 = 10_000;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryFixture {
    pub factory: Address,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairFixture {
    pub factory: Address,
    pub token0: Address,
    pub token1: Address,
    pub pair: Address,
}

/// Deploys a factory with `wallet` as its fee-to setter.
pub async fn factory_fixture(
    deployer: &(impl Deployer + ?Sized),
    wallet: Address,
    artifacts: &FixtureArtifacts,
    options: &DeployOptions,
) -> Result<FactoryFixture> {
    let deployment = deployer
        .deploy(wallet, &artifacts.factory, vec![Token::Address(wallet)], options)
        .await
        .map_err(Error::collaborator("deploy factory"))?;
    log::info!("factory deployed at {:?}", deployment.address);

    Ok(FactoryFixture { factory: deployment.address })
}

/// Factory plus a freshly created pair of two new tokens.
///
/// The pair address the factory reports must match the CREATE2 prediction
/// from the pair artifact's creation code.
pub async fn pair_fixture(
    deployer: &(impl Deployer + ?Sized),
    client: &(impl PairFactoryClient + ?Sized),
    wallet: Address,
    artifacts: &FixtureArtifacts,
    options: &DeployOptions,
) -> Result<PairFixture> {
    let FactoryFixture { factory } = factory_fixture(deployer, wallet, artifacts, options).await?;

    let supply = expand_to_18_decimals(FIXTURE_TOKEN_SUPPLY)?;
    let token_a = deployer
        .deploy(wallet, &artifacts.erc20, vec![Token::Uint(supply)], options)
        .await
        .map_err(Error::collaborator("deploy token A"))?
        .address;
    let token_b = deployer
        .deploy(wallet, &artifacts.erc20, vec![Token::Uint(supply)], options)
        .await
        .map_err(Error::collaborator("deploy token B"))?
        .address;
    let tokens = TokenPair::new(token_a, token_b)?;

    client
        .create_pair(wallet, factory, token_a, token_b, options)
        .await
        .map_err(Error::collaborator("createPair"))?;
    let pair = client
        .get_pair(factory, token_a, token_b)
        .await
        .map_err(Error::collaborator("getPair"))?;

    let expected = derive_address(factory, &tokens, artifacts.pair.init_code_hash());
    if pair != expected {
        return Err(Error::AddressMismatch { expected, actual: pair });
    }

    let token0 = client.token0(pair).await.map_err(Error::collaborator("token0()"))?;
    if token0 != tokens.token0() {
        log::warn!(
            "pair {:?} reports token0 {:?}, expected {:?}",
            pair,
            token0,
            tokens.token0()
        );
    }
    let (token0, token1) = if token0 == token_a { (token_a, token_b) } else { (token_b, token_a) };
    log::info!("pair {:?} created for {:?}/{:?}", pair, token0, token1);

    Ok(PairFixture { factory, token0, token1, pair })
}
