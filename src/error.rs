use thiserror::Error;

use crate::models::types::{Address, U256};

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the testkit.
///
/// Everything except [`Error::Collaborator`] and [`Error::AddressMismatch`] is a
/// caller contract violation: the input can never produce a meaningful
/// result, so nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    #[error("invalid 32-byte hash {0:?}")]
    InvalidHash(String),

    #[error("token pair needs two distinct tokens, got {0:?} twice")]
    IdenticalTokens(Address),

    #[error("reserves must be nonzero")]
    ZeroReserve,

    #[error("reserve {0} does not fit in 112 bits")]
    ReserveOverflow(U256),

    #[error("{0} does not fit in UQ112x112")]
    RatioOverflow(U256),

    #[error("{n} * 10^{decimals} overflows 256 bits")]
    ScaleOverflow { n: u64, decimals: u32 },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("permit owner is {owner:?} but the signing wallet is {signer:?}")]
    SignerMismatch { owner: Address, signer: Address },

    #[error("invalid permit signature: {0}")]
    InvalidSignature(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("artifact error: {0}")]
    Artifact(String),

    #[error("{operation} failed: {source}")]
    Collaborator {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("factory returned pair {actual:?}, CREATE2 derivation gives {expected:?}")]
    AddressMismatch { expected: Address, actual: Address },
}

impl Error {
    /// Wraps a collaborator failure with the name of the call that failed.
    pub fn collaborator(operation: &'static str) -> impl FnOnce(anyhow::Error) -> Error {
        move |source| Error::Collaborator { operation, source }
    }

    pub fn is_input_violation(&self) -> bool {
        !matches!(self, Error::Collaborator { .. } | Error::AddressMismatch { .. })
    }
}
