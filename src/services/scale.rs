use crate::error::{Error, Result};
use crate::models::types::U256;

/// `n * 10^decimals`, the raw amount of `n` whole tokens.
pub fn expand_to_decimals(n: u64, decimals: u32) -> Result<U256> {
    U256::from(10u64)
        .checked_pow(U256::from(decimals))
        .and_then(|scale| scale.checked_mul(U256::from(n)))
        .ok_or(Error::ScaleOverflow { n, decimals })
}

pub fn expand_to_18_decimals(n: u64) -> Result<U256> {
    expand_to_decimals(n, 18)
}
