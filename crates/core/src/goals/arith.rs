//! Guarded arithmetic for goal figures.
//!
//! Zero denominators resolve to zero and overflow saturates at the `Decimal`
//! bounds, so a half-edited plan always yields a finite report and larger
//! inputs never produce smaller figures.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// The `Decimal` bound an overflowing result of the given sign saturates to.
const fn bound(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

/// `numerator / denominator`, or zero when the denominator is not positive.
/// An overflowing quotient saturates.
pub(crate) fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .unwrap_or_else(|| bound(numerator.is_sign_negative()))
}

/// `value * percent / 100`, saturating on overflow.
pub(crate) fn percent_of(value: Decimal, percent: Decimal) -> Decimal {
    value.checked_mul(percent).map_or_else(
        || product(value, percent / Decimal::ONE_HUNDRED),
        |product| product / Decimal::ONE_HUNDRED,
    )
}

/// `a * b`, saturating on overflow.
pub(crate) fn product(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b)
        .unwrap_or_else(|| bound(a.is_sign_negative() != b.is_sign_negative()))
}

/// `a + b`, saturating on overflow.
pub(crate) fn sum(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b)
        .unwrap_or_else(|| bound(b.is_sign_negative()))
}

/// Rounds up to a whole count. Negative values count as zero, values past
/// `u64::MAX` saturate.
pub(crate) fn ceil_count(value: Decimal) -> u64 {
    if value <= Decimal::ZERO {
        return 0;
    }
    value.ceil().to_u64().unwrap_or(u64::MAX)
}
