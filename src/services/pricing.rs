use crate::error::{Error, Result};
use crate::models::price::{q112, FixedPointRatio, RESOLUTION};
use crate::models::types::U256;

/// Reference UQ112x112 prices for a pair's reserves:
/// `(reserve1 / reserve0, reserve0 / reserve1)`, truncated.
///
/// These are the per-second increments of `price0CumulativeLast` and
/// `price1CumulativeLast`.
pub fn encode_price(reserve0: U256, reserve1: U256) -> Result<(FixedPointRatio, FixedPointRatio)> {
    check_reserve(reserve0)?;
    check_reserve(reserve1)?;

    // reserve < 2^112, so reserve * 2^112 < 2^224
    let price0 = (reserve1 << RESOLUTION) / reserve0;
    let price1 = (reserve0 << RESOLUTION) / reserve1;

    Ok((FixedPointRatio::from_raw(price0), FixedPointRatio::from_raw(price1)))
}

fn check_reserve(reserve: U256) -> Result<()> {
    if reserve.is_zero() {
        return Err(Error::ZeroReserve);
    }
    if reserve >= q112() {
        return Err(Error::ReserveOverflow(reserve));
    }
    Ok(())
}
