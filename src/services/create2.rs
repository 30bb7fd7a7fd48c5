//! CREATE2 address prediction for pairs deployed by a factory.
//!
//! `address = keccak256(0xff ‖ deployer ‖ salt ‖ init_code_hash)[12..32]`, with
//! the pair salt being `keccak256(abi.encodePacked(token0, token1))`.

use crate::error::Result;
use crate::models::token_pair::TokenPair;
use crate::models::types::{Address, Hash};
use crate::services::hashing::{encode, keccak256, AbiValue, Encoding};

/// Prefix byte that keeps CREATE2 preimages apart from CREATE's RLP input.
const CREATE2_PREFIX: u8 = 0xff;

/// Salt a pair factory uses for `pair`: the packed, unpadded token addresses.
pub fn pair_salt(pair: &TokenPair) -> Hash {
    let (token0, token1) = pair.get();
    keccak256(encode(
        &[AbiValue::Address(token0), AbiValue::Address(token1)],
        Encoding::Packed,
    ))
}

pub fn create2_address(deployer: Address, salt: Hash, init_code_hash: Hash) -> Address {
    let mut preimage = [0u8; 1 + 20 + 32 + 32];
    preimage[0] = CREATE2_PREFIX;
    preimage[1..21].copy_from_slice(deployer.as_bytes());
    preimage[21..53].copy_from_slice(salt.as_bytes());
    preimage[53..85].copy_from_slice(init_code_hash.as_bytes());

    let digest = keccak256(preimage);
    Address::from_slice(&digest.as_bytes()[12..])
}

/// Address at which `deployer` creates the pair contract for `pair`.
pub fn derive_address(deployer: Address, pair: &TokenPair, init_code_hash: Hash) -> Address {
    let address = create2_address(deployer, pair_salt(pair), init_code_hash);
    log::debug!(
        "pair {:?}/{:?} under {:?} -> {:?}",
        pair.token0(),
        pair.token1(),
        deployer,
        address
    );
    address
}

/// Same as [`derive_address`], starting from the raw creation bytecode and an
/// unordered token tuple.
pub fn create2_address_from_bytecode(
    deployer: Address,
    (token_a, token_b): (Address, Address),
    bytecode: &[u8],
) -> Result<Address> {
    let pair = TokenPair::new(token_a, token_b)?;
    Ok(derive_address(deployer, &pair, keccak256(bytecode)))
}
