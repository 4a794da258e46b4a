//! Money
//!
//! Fixed-currency monetary helpers. Every amount in this crate is Indonesian
//! Rupiah; the currency is not configurable.

use rusty_money::{Money, iso};

/// A monetary amount in Indonesian Rupiah.
pub type Amount = Money<'static, iso::Currency>;

/// The currency used for all monetary values.
#[must_use]
pub fn currency() -> &'static iso::Currency {
    iso::IDR
}

/// Creates an amount from whole rupiah, the unit catalog data is quoted in.
#[must_use]
pub fn rupiah(amount: i64) -> Amount {
    Money::from_major(amount, iso::IDR)
}

/// Creates an amount from minor units.
#[must_use]
pub fn from_minor(minor: i64) -> Amount {
    Money::from_minor(minor, iso::IDR)
}

/// Whole-rupiah value of an amount, truncating any fractional part.
#[must_use]
pub fn to_rupiah(amount: &Amount) -> i64 {
    let scale = 10_i64.pow(iso::IDR.exponent);
    amount.to_minor_units() / scale
}
