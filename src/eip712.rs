//! EIP-712 digests for ERC-20 `permit` approvals.
//!
//! <https://eips.ethereum.org/EIPS/eip-712>

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::models::types::{Address, Hash, U256};
use crate::services::hashing::{encode, keccak256, keccak256_utf8, AbiValue, Encoding};

pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

pub const PERMIT_TYPE: &str =
    "Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";

/// Version every permit domain signs under.
pub const DOMAIN_VERSION: &str = "1";

/// Chain id the legacy permit helpers pinned every domain separator to.
pub const LEGACY_CHAIN_ID: u64 = 1;

pub static DOMAIN_TYPEHASH: LazyLock<Hash> = LazyLock::new(|| keccak256_utf8(DOMAIN_TYPE));
pub static PERMIT_TYPEHASH: LazyLock<Hash> = LazyLock::new(|| keccak256_utf8(PERMIT_TYPE));

/// Typed-data prefix: EIP-191 version byte `0x01`.
const DIGEST_PREFIX: [u8; 2] = [0x19, 0x01];

/// EIP712 Domain Separator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Eip712Domain {
    pub fn new(name: impl Into<String>, chain_id: u64, verifying_contract: Address) -> Self {
        Eip712Domain {
            name: name.into(),
            version: DOMAIN_VERSION.to_string(),
            chain_id,
            verifying_contract,
        }
    }

    /// Domain pinned to chain id 1 regardless of the chain under test.
    pub fn legacy(name: impl Into<String>, verifying_contract: Address) -> Self {
        Self::new(name, LEGACY_CHAIN_ID, verifying_contract)
    }

    pub fn separator(&self) -> Hash {
        domain_separator(self)
    }
}

/// Body of a `permit(owner, spender, value, deadline, v, r, s)` call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PermitPayload {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    pub nonce: U256,
    pub deadline: U256,
}

pub fn domain_separator(domain: &Eip712Domain) -> Hash {
    keccak256(encode(
        &[
            AbiValue::Bytes32(*DOMAIN_TYPEHASH),
            AbiValue::Bytes32(keccak256_utf8(&domain.name)),
            AbiValue::Bytes32(keccak256_utf8(&domain.version)),
            AbiValue::Uint256(U256::from(domain.chain_id)),
            AbiValue::Address(domain.verifying_contract),
        ],
        Encoding::Padded,
    ))
}

pub fn permit_struct_hash(permit: &PermitPayload) -> Hash {
    keccak256(encode(
        &[
            AbiValue::Bytes32(*PERMIT_TYPEHASH),
            AbiValue::Address(permit.owner),
            AbiValue::Address(permit.spender),
            AbiValue::Uint256(permit.value),
            AbiValue::Uint256(permit.nonce),
            AbiValue::Uint256(permit.deadline),
        ],
        Encoding::Padded,
    ))
}

/// `0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash`
pub fn approval_preimage(domain: &Eip712Domain, permit: &PermitPayload) -> [u8; 66] {
    let packed = encode(
        &[
            AbiValue::Raw(DIGEST_PREFIX.to_vec()),
            AbiValue::Bytes32(domain_separator(domain)),
            AbiValue::Bytes32(permit_struct_hash(permit)),
        ],
        Encoding::Packed,
    );

    let mut preimage = [0u8; 66];
    preimage.copy_from_slice(&packed);
    preimage
}

/// The digest the permit owner signs.
pub fn approval_digest(domain: &Eip712Domain, permit: &PermitPayload) -> Hash {
    keccak256(approval_preimage(domain, permit))
}
