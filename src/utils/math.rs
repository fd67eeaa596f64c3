//! Mathematical utility functions

use alloy::primitives::U256;
use rust_decimal::prelude::*;

/// `10^exp` in 256 bits, `None` past 10^77.
pub fn pow10_u256(exp: u32) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}

/// Whether `raw / 10^decimals >= min`, computed exactly on integers.
pub fn meets_min_reserve(raw: u128, decimals: u8, min: Decimal) -> bool {
    if min.is_sign_negative() || min.is_zero() {
        return true;
    }

    // min == mantissa / 10^scale, so compare raw * 10^scale with mantissa * 10^decimals
    let mantissa = U256::from(min.mantissa().unsigned_abs());
    let lhs = pow10_u256(min.scale()).and_then(|p| U256::from(raw).checked_mul(p));
    let threshold = pow10_u256(u32::from(decimals)).and_then(|p| p.checked_mul(mantissa));

    match (lhs, threshold) {
        (Some(lhs), Some(threshold)) => lhs >= threshold,
        // threshold beyond 256 bits, out of reach for any uint112 reserve
        (_, None) => false,
        (None, Some(_)) => true,
    }
}

/// Human-readable reserve amount; lossy for very large decimals.
pub fn normalize_reserve(raw: u128, decimals: u8) -> Option<Decimal> {
    let mut value = Decimal::from_u128(raw)?;
    let mut remaining = u32::from(decimals);
    while remaining > 0 {
        let step = remaining.min(28);
        value = value.checked_div(Decimal::from_i128_with_scale(10i128.pow(step), 0))?;
        remaining -= step;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tiny_reserve_is_below_one_unit() {
        assert!(!meets_min_reserve(5, 18, dec!(1)));
        assert_eq!(normalize_reserve(5, 18), Some(dec!(0.000000000000000005)));
    }

    #[test]
    fn exactly_one_unit_passes() {
        assert!(meets_min_reserve(1_000_000, 6, dec!(1)));
        assert!(!meets_min_reserve(999_999, 6, dec!(1)));
    }

    #[test]
    fn fractional_threshold() {
        assert!(meets_min_reserve(500_000, 6, dec!(0.5)));
        assert!(!meets_min_reserve(499_999, 6, dec!(0.5)));
    }

    #[test]
    fn zero_threshold_accepts_everything() {
        assert!(meets_min_reserve(0, 18, dec!(0)));
    }

    #[test]
    fn huge_decimals_never_pass() {
        let max_uint112 = (1u128 << 112) - 1;
        assert!(pow10_u256(78).is_none());
        assert!(!meets_min_reserve(max_uint112, 255, dec!(1)));
        assert!(!meets_min_reserve(max_uint112, 34, dec!(1)));
        assert!(meets_min_reserve(max_uint112, 33, dec!(1)));
    }

    #[test]
    fn normalize_handles_more_than_28_decimals() {
        let value = normalize_reserve(10u128.pow(28), 30).unwrap();
        assert_eq!(value, dec!(0.01));
    }

    proptest! {
        #[test]
        fn one_unit_threshold_matches_digit_count(
            raw in 1u128..(1u128 << 112),
            decimals in 0u8..=40,
        ) {
            // raw >= 10^d exactly when raw has more than d decimal digits
            let digits = raw.to_string().len();
            prop_assert_eq!(meets_min_reserve(raw, decimals, dec!(1)), digits > decimals as usize);
        }

        #[test]
        fn raising_the_threshold_never_admits_more(
            raw in 0u128..(1u128 << 112),
            decimals in 0u8..=30,
            low in 0u32..1000,
            extra in 0u32..1000,
        ) {
            let low_min = Decimal::from(low) / dec!(10);
            let high_min = Decimal::from(low + extra) / dec!(10);
            if meets_min_reserve(raw, decimals, high_min) {
                prop_assert!(meets_min_reserve(raw, decimals, low_min));
            }
        }
    }
}
