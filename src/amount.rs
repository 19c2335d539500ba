//! Fixed-point amount conversion
//!
//! Exchange lot and tick sizes are published as decimals and stored in the
//! token list as integer minor units (10^8 per unit).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

/// Number of decimal places kept in minor units
pub const MINOR_UNIT_SCALE: u32 = 8;

const MINOR_UNITS_PER_UNIT: i64 = 100_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount {0} has precision beyond 8 decimal places")]
    PrecisionLoss(Decimal),

    #[error("amount {0} is negative")]
    Negative(Decimal),

    #[error("amount {0} does not fit in minor units")]
    Overflow(Decimal),
}

/// Convert a decimal amount to minor units, rejecting any remainder below the scale
pub fn to_minor_units(amount: Decimal) -> Result<i64, AmountError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AmountError::Negative(amount));
    }

    let scaled = amount
        .checked_mul(Decimal::from(MINOR_UNITS_PER_UNIT))
        .ok_or(AmountError::Overflow(amount))?;

    if !scaled.fract().is_zero() {
        return Err(AmountError::PrecisionLoss(amount));
    }

    scaled.to_i64().ok_or(AmountError::Overflow(amount))
}

/// Inverse of [`to_minor_units`]
pub fn from_minor_units(units: i64) -> Decimal {
    Decimal::new(units, MINOR_UNIT_SCALE)
}

/// Minor units rendered as the decimal string stored in pairs
pub fn format_minor_units(amount: Decimal) -> Result<String, AmountError> {
    to_minor_units(amount).map(|units| units.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn one_satoshi() {
        assert_eq!(to_minor_units(dec!(0.00000001)), Ok(1));
    }

    #[test]
    fn whole_units() {
        assert_eq!(to_minor_units(dec!(1)), Ok(100_000_000));
        assert_eq!(to_minor_units(dec!(1000.00000000)), Ok(100_000_000_000));
        assert_eq!(to_minor_units(Decimal::ZERO), Ok(0));
    }

    #[test]
    fn trailing_zeros_past_scale_are_accepted() {
        assert_eq!(to_minor_units(dec!(0.0000000100)), Ok(1));
    }

    #[test]
    fn remainder_below_scale_is_rejected() {
        assert_eq!(
            to_minor_units(dec!(0.000000015)),
            Err(AmountError::PrecisionLoss(dec!(0.000000015)))
        );
    }

    #[test]
    fn negative_is_rejected() {
        assert!(matches!(
            to_minor_units(dec!(-0.1)),
            Err(AmountError::Negative(_))
        ));
    }

    #[test]
    fn overflow_is_rejected() {
        assert!(matches!(
            to_minor_units(dec!(100000000000000)),
            Err(AmountError::Overflow(_))
        ));
    }

    #[test]
    fn round_trip_within_scale() {
        for amount in [dec!(0.00000001), dec!(0.001), dec!(1.5), dec!(12345.6789)] {
            let units = to_minor_units(amount).unwrap();
            assert_eq!(from_minor_units(units), amount);
        }
    }

    #[test]
    fn formats_as_integer_string() {
        assert_eq!(format_minor_units(dec!(0.01)).unwrap(), "1000000");
    }
}
