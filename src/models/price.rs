use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;
use crate::models::types::U256;

/// Fractional bits of the UQ112x112 format.
pub const RESOLUTION: usize = 112;

/// 2^112, the UQ112x112 representation of 1.
pub fn q112() -> U256 {
    U256::one() << RESOLUTION
}

/// An unsigned UQ112x112 fixed-point number: `raw / 2^112`.
///
/// Always `raw < 2^224`. Built by the price encoder, or checked on the way in
/// through `TryFrom<U256>`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "U256")]
pub struct FixedPointRatio(U256);

fn ratio_limit() -> U256 {
    U256::one() << (2 * RESOLUTION)
}

impl FixedPointRatio {
    pub(crate) fn from_raw(raw: U256) -> Self {
        debug_assert!(raw < ratio_limit());
        FixedPointRatio(raw)
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    /// Advances a cumulative-price accumulator by `elapsed` seconds at this
    /// price. Wraps at 2^256 like the on-chain counter.
    pub fn accumulate(&self, cumulative: U256, elapsed: u32) -> U256 {
        let (increment, _) = self.0.overflowing_mul(U256::from(elapsed));
        cumulative.overflowing_add(increment).0
    }

    /// Decimal value of the ratio, for assertions and log lines.
    pub fn to_decimal(&self) -> BigDecimal {
        u256_to_bigdecimal(self.0) / u256_to_bigdecimal(q112())
    }
}

impl TryFrom<U256> for FixedPointRatio {
    type Error = Error;

    fn try_from(raw: U256) -> Result<Self, Error> {
        if raw >= ratio_limit() {
            return Err(Error::RatioOverflow(raw));
        }
        Ok(FixedPointRatio(raw))
    }
}

impl fmt::Display for FixedPointRatio {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

/// Converts U256 to BigDecimal
fn u256_to_bigdecimal(value: U256) -> BigDecimal {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    let big_int = BigInt::from_biguint(Sign::Plus, BigUint::from_bytes_be(&bytes));
    BigDecimal::new(big_int, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn renders_exact_decimals() {
        let four = FixedPointRatio::from_raw(q112() * 4);
        let quarter = FixedPointRatio::from_raw(q112() / 4);

        assert_eq!(four.to_decimal(), BigDecimal::from(4));
        assert_eq!(quarter.to_decimal(), BigDecimal::from_str("0.25").unwrap());
    }

    #[test]
    fn accumulates_per_second() {
        let price = FixedPointRatio::from_raw(q112() / 2);
        assert_eq!(price.accumulate(U256::zero(), 0), U256::zero());
        assert_eq!(price.accumulate(U256::zero(), 10), q112() * 5);
        assert_eq!(price.accumulate(q112(), 2), q112() * 2);
    }

    #[test]
    fn accumulator_wraps() {
        let price = FixedPointRatio::from_raw(q112());
        assert_eq!(price.accumulate(U256::MAX, 1), q112() - 1);
    }

    #[test]
    fn checked_from_raw_value() {
        let max = ratio_limit() - 1;
        assert_eq!(FixedPointRatio::try_from(max).unwrap().raw(), max);
        assert!(matches!(
            FixedPointRatio::try_from(ratio_limit()),
            Err(Error::RatioOverflow(raw)) if raw == ratio_limit()
        ));
    }

    #[test]
    fn deserializing_rejects_values_past_224_bits() {
        let too_wide = serde_json::to_string(&U256::MAX).unwrap();
        let err = serde_json::from_str::<FixedPointRatio>(&too_wide).unwrap_err();
        assert!(err.to_string().contains("UQ112x112"));

        let price = FixedPointRatio::from_raw(q112() * 3);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(serde_json::from_str::<FixedPointRatio>(&json).unwrap(), price);
    }

    #[test]
    fn largest_ratio_accumulates_without_panicking() {
        let price = FixedPointRatio::try_from(ratio_limit() - 1).unwrap();
        let expected = (ratio_limit() - 1).overflowing_mul(U256::from(u32::MAX)).0;
        assert_eq!(price.accumulate(U256::zero(), u32::MAX), expected);
    }
}
