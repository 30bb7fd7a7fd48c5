use ethers::abi::{self, Token};
use sha3::{Digest, Keccak256};

use crate::models::types::{Address, Hash, U256};

/// Keccak-256 of arbitrary bytes.
pub fn keccak256(data: impl AsRef<[u8]>) -> Hash {
    Hash::from_slice(&Keccak256::digest(data.as_ref()))
}

/// Keccak-256 of a string's UTF-8 bytes.
pub fn keccak256_utf8(text: &str) -> Hash {
    keccak256(text.as_bytes())
}

/// One typed value handed to [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Bytes32(Hash),
    Address(Address),
    Uint256(U256),
    /// Raw bytes; in padded mode they are encoded as a dynamic `bytes`.
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `abi.encodePacked`: every value at its natural width, no padding.
    Packed,
    /// `abi.encode`: every static value in its own 32-byte word.
    Padded,
}

pub fn encode(values: &[AbiValue], encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Padded => {
            let tokens: Vec<Token> = values.iter().map(to_token).collect();
            abi::encode(&tokens)
        }
        Encoding::Packed => {
            let mut out = Vec::new();
            for value in values {
                match value {
                    AbiValue::Bytes32(hash) => out.extend_from_slice(hash.as_bytes()),
                    AbiValue::Address(address) => out.extend_from_slice(address.as_bytes()),
                    AbiValue::Uint256(n) => {
                        let mut word = [0u8; 32];
                        n.to_big_endian(&mut word);
                        out.extend_from_slice(&word);
                    }
                    AbiValue::Raw(bytes) => out.extend_from_slice(bytes),
                }
            }
            out
        }
    }
}

fn to_token(value: &AbiValue) -> Token {
    match value {
        AbiValue::Bytes32(hash) => Token::FixedBytes(hash.as_bytes().to_vec()),
        AbiValue::Address(address) => Token::Address(*address),
        AbiValue::Uint256(n) => Token::Uint(*n),
        AbiValue::Raw(bytes) => Token::Bytes(bytes.clone()),
    }
}
