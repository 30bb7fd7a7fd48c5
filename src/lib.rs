//! Off-chain reference computations for testing an AMM pair factory:
//! CREATE2 pair addresses, EIP-712 permit digests and UQ112x112 prices,
//! plus the dev-chain helpers the fixtures use.

pub mod chain;
pub mod config;
pub mod eip712;
pub mod error;
pub mod models;
pub mod services;

pub use crate::eip712::{approval_digest, domain_separator, Eip712Domain, PermitPayload};
pub use crate::error::{Error, Result};
pub use crate::models::price::FixedPointRatio;
pub use crate::models::token_pair::TokenPair;
pub use crate::models::types::{Address, Hash, U256};
pub use crate::services::create2::derive_address;
pub use crate::services::pricing::encode_price;
pub use crate::services::scale::{expand_to_18_decimals, expand_to_decimals};
