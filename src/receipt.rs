//! Receipt
//!
//! Terminal rendering of a finished transaction: one row per cart line with
//! a price-origin badge, followed by totals and the savings against list
//! prices ("Hemat" on Indonesian receipts).

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::MoneyError;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    money::{Amount, from_minor},
    pricing::PriceOrigin,
};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    Io,
}

/// One rendered line of the receipt.
#[derive(Debug, Clone)]
struct ReceiptRow {
    name: String,
    unit: String,
    quantity: u32,
    unit_price: Amount,
    origin: PriceOrigin,
    line_total: Amount,
}

/// Final receipt for a finished cart.
#[derive(Debug, Clone)]
pub struct Receipt {
    rows: Vec<ReceiptRow>,
    subtotal: Amount,
    total: Amount,
    member_name: String,
}

impl Receipt {
    /// Captures a receipt from the current cart state.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let rows = cart
            .lines()
            .iter()
            .map(|line| ReceiptRow {
                name: line.name().to_string(),
                unit: line.unit().to_string(),
                quantity: line.quantity(),
                unit_price: line.unit_price(),
                origin: line.origin(),
                line_total: line.line_total(),
            })
            .collect();

        let subtotal_minor = cart.lines().iter().fold(0_i64, |acc, line| {
            acc.saturating_add(
                line.list_price()
                    .to_minor_units()
                    .saturating_mul(i64::from(line.quantity())),
            )
        });

        Receipt {
            rows,
            subtotal: from_minor(subtotal_minor),
            total: cart.grand_total(),
            member_name: cart.member().name.clone(),
        }
    }

    /// Total at list prices, before member, grosir or manual pricing.
    #[must_use]
    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }

    /// Amount payable.
    #[must_use]
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Savings against list prices.
    ///
    /// Negative when manual overrides raised a price above list.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Amount, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Savings as a fraction of the list-price subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings_percent(&self) -> Result<Percentage, MoneyError> {
        let savings = self.savings()?;

        let savings_minor = savings.to_minor_units();
        let subtotal_minor = self.subtotal.to_minor_units();

        if subtotal_minor == 0 {
            return Ok(Percentage::from(0.0));
        }

        let savings_dec = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
        let subtotal_dec = Decimal::from_i64(subtotal_minor).unwrap_or(Decimal::ZERO);

        Ok(Percentage::from(savings_dec / subtotal_dec))
    }

    /// Prints the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be printed.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Satuan", "Qty", "Harga Satuan", "", "Sub Total"]);

        let mut color_ops: Vec<(usize, Color)> = Vec::new();

        for (idx, row) in self.rows.iter().enumerate() {
            builder.push_record([
                row.name.clone(),
                row.unit.clone(),
                row.quantity.to_string(),
                format!("{}", row.unit_price),
                row.origin.badge().unwrap_or_default().to_string(),
                format!("{}", row.line_total),
            ]);

            if let Some(color) = badge_color(row.origin) {
                color_ops.push((idx + 1, color));
            }
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..4), Alignment::right());
        table.modify(Columns::new(5..6), Alignment::right());

        for (row, color) in color_ops {
            table.modify((row, 4), color);
        }

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::Io)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let savings = self.savings()?;
        let savings_percent_points = percent_points(self.savings_percent()?);

        writeln!(out, " Member:   {}", self.member_name).map_err(|_err| ReceiptError::Io)?;
        writeln!(out, " Subtotal: {}", self.subtotal).map_err(|_err| ReceiptError::Io)?;
        writeln!(out, " \x1b[1mTotal:    {}\x1b[0m", self.total).map_err(|_err| ReceiptError::Io)?;
        writeln!(out, " Hemat:    ({savings_percent_points:.2}%) {savings}")
            .map_err(|_err| ReceiptError::Io)?;

        Ok(())
    }
}

/// Badge color per origin: member blue, grosir green, manual yellow.
fn badge_color(origin: PriceOrigin) -> Option<Color> {
    match origin {
        PriceOrigin::Member => Some(Color::FG_BLUE),
        PriceOrigin::Grosir => Some(Color::FG_GREEN),
        PriceOrigin::Manual => Some(Color::FG_YELLOW),
        PriceOrigin::Regular => None,
    }
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    ((percentage * Decimal::ONE) * Decimal::from_i64(100).unwrap_or(Decimal::ZERO)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use num_traits::FromPrimitive;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        catalog::{Product, ProductId, ProductPricing, VolumeTier},
        money::rupiah,
        notify::NullSink,
    };

    use super::*;

    fn tiered_product() -> Product {
        Product {
            id: ProductId(1),
            name: "Beras Premium 5kg".to_string(),
            unit: "sak".to_string(),
            cost: rupiah(70_000),
            expiry: String::new(),
            barcode: String::new(),
            note: String::new(),
            pricing: ProductPricing {
                list_price: rupiah(78_000),
                member_prices: smallvec![],
                volume_tiers: smallvec![VolumeTier {
                    min_qty: 5,
                    price: rupiah(74_000),
                }],
            },
        }
    }

    fn grosir_cart() -> Cart {
        let mut cart = Cart::new();

        cart.add_product(Some(&tiered_product()), &mut NullSink);
        cart.set_quantity(ProductId(1), 5, &mut NullSink);

        cart
    }

    #[test]
    fn totals_reflect_list_and_effective_prices() {
        let receipt = Receipt::from_cart(&grosir_cart());

        assert_eq!(receipt.subtotal(), rupiah(390_000));
        assert_eq!(receipt.total(), rupiah(370_000));
    }

    #[test]
    fn savings_is_subtotal_minus_total() -> TestResult {
        let receipt = Receipt::from_cart(&grosir_cart());

        assert_eq!(receipt.savings()?, rupiah(20_000));

        Ok(())
    }

    #[test]
    fn savings_percent_is_zero_for_empty_cart() -> TestResult {
        let receipt = Receipt::from_cart(&Cart::new());

        assert_eq!(receipt.savings_percent()?, Percentage::from(0.0));

        Ok(())
    }

    #[test]
    fn savings_percent_matches_discount_ratio() -> TestResult {
        // List 100,000, tier price 75,000 from quantity 4: a flat 25% off.
        let mut product = tiered_product();
        product.pricing.list_price = rupiah(100_000);
        product.pricing.volume_tiers = smallvec![VolumeTier {
            min_qty: 4,
            price: rupiah(75_000),
        }];

        let mut cart = Cart::new();
        cart.add_product(Some(&product), &mut NullSink);
        cart.set_quantity(ProductId(1), 4, &mut NullSink);

        let receipt = Receipt::from_cart(&cart);
        let points = percent_points(receipt.savings_percent()?);

        assert_eq!(
            points,
            Decimal::from_i64(25).ok_or("Failed to convert to Decimal")?
        );

        Ok(())
    }

    #[test]
    fn write_to_renders_rows_badges_and_summary() -> TestResult {
        let mut out = Vec::new();

        Receipt::from_cart(&grosir_cart()).write_to(&mut out)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Beras Premium 5kg"));
        assert!(output.contains("sak"));
        assert!(output.contains("Grosir"));
        assert!(output.contains("Member:"));
        assert!(output.contains("Umum"));
        assert!(output.contains("Subtotal:"));
        assert!(output.contains("Total:"));
        assert!(output.contains("Hemat:"));

        Ok(())
    }

    #[test]
    fn regular_lines_carry_no_badge() -> TestResult {
        let mut cart = Cart::new();
        cart.add_product(Some(&tiered_product()), &mut NullSink);

        let mut out = Vec::new();
        Receipt::from_cart(&cart).write_to(&mut out)?;

        let output = String::from_utf8(out)?;

        assert!(!output.contains("Grosir"));
        assert!(output.contains("(0.00%)"));

        Ok(())
    }
}
