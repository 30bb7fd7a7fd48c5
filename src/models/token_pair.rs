use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::types::Address;

/// Two distinct tokens, stored in canonical order (`token0 < token1`).
///
/// The order is the numeric order of the 20 address bytes, which is what
/// the pair factory sorts by on-chain. Checksummed string forms must never
/// be compared directly.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "UncheckedPair")]
pub struct TokenPair {
    token0: Address,
    token1: Address,
}

/// Wire form of a [`TokenPair`]; deserialized pairs are re-sorted and checked.
#[derive(Deserialize)]
struct UncheckedPair {
    token0: Address,
    token1: Address,
}

impl TryFrom<UncheckedPair> for TokenPair {
    type Error = Error;

    fn try_from(pair: UncheckedPair) -> Result<Self> {
        TokenPair::new(pair.token0, pair.token1)
    }
}

impl TokenPair {
    pub fn new(token_a: Address, token_b: Address) -> Result<Self> {
        match token_a.cmp(&token_b) {
            std::cmp::Ordering::Less => Ok(TokenPair { token0: token_a, token1: token_b }),
            std::cmp::Ordering::Greater => Ok(TokenPair { token0: token_b, token1: token_a }),
            std::cmp::Ordering::Equal => Err(Error::IdenticalTokens(token_a)),
        }
    }

    pub fn token0(&self) -> Address {
        self.token0
    }

    pub fn token1(&self) -> Address {
        self.token1
    }

    /// `(token0, token1)`
    pub fn get(&self) -> (Address, Address) {
        (self.token0, self.token1)
    }

    pub fn contains(&self, token: &Address) -> bool {
        self.token0 == *token || self.token1 == *token
    }
}
