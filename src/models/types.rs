use ethereum_types::{H160, H256};
use std::str::FromStr;

use crate::error::{Error, Result};

pub use ethereum_types::U256;

pub type Address = H160; // Ethereum address as a 20-byte value
pub type Hash = H256; // 32-byte keccak output: digests, domain separators, init code hashes

/// EIP-55 rendering of an address.
pub fn to_checksum(address: &Address) -> String {
    ethers::utils::to_checksum(address, None)
}

/// Parses a hex address. All-lowercase or all-uppercase input is taken as-is,
/// mixed case must be a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address> {
    let body = strip_hex_prefix(input);
    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidAddress(input.to_string()));
    }

    let address = H160::from_str(body).map_err(|_| Error::InvalidAddress(input.to_string()))?;

    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&address)[2..] != *body {
        log::debug!("checksum mismatch for {}", input);
        return Err(Error::InvalidAddress(input.to_string()));
    }

    Ok(address)
}

pub fn parse_hash(input: &str) -> Result<Hash> {
    let body = strip_hex_prefix(input);
    if body.len() != 64 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHash(input.to_string()));
    }
    H256::from_str(body).map_err(|_| Error::InvalidHash(input.to_string()))
}

fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}
