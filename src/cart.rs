//! Cart
//!
//! The active transaction on the cashier screen: one line per product,
//! repriced through the resolver on every mutation. All operations are total
//! over user input: malformed quantities and prices are clamped or ignored,
//! never an error or a panic.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Member, MemberId, Product, ProductId, ProductPricing},
    money::{Amount, from_minor},
    notify::{Notice, NotificationSink},
    pricing::{PriceOrigin, ResolvedPrice, resolve_unit_price},
};

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The buyer cannot change once the cart has lines; mixing member and
    /// non-member pricing within one transaction is undefined.
    #[error("cannot change member while the cart has lines")]
    MemberLocked,
}

/// One line of the active transaction.
///
/// `line_total` always equals `quantity x unit_price`; both are updated in
/// the same step on every mutation.
#[derive(Debug, Clone)]
pub struct CartLine {
    product_id: ProductId,
    name: String,
    unit: String,
    pricing: ProductPricing,
    quantity: u32,
    unit_price: Amount,
    origin: PriceOrigin,
    manual_price: Option<Amount>,
    line_total: Amount,
}

impl CartLine {
    /// Backend id of the product on this line.
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Product name at add time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit of sale.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Quantity, always at least 1.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The currently effective unit price.
    #[must_use]
    pub fn unit_price(&self) -> Amount {
        self.unit_price
    }

    /// The rule that produced the unit price.
    #[must_use]
    pub fn origin(&self) -> PriceOrigin {
        self.origin
    }

    /// The sticky manual override, if one is active.
    #[must_use]
    pub fn manual_price(&self) -> Option<Amount> {
        self.manual_price
    }

    /// The list price snapshot taken when the line was created.
    #[must_use]
    pub fn list_price(&self) -> Amount {
        self.pricing.list_price
    }

    /// Line subtotal.
    #[must_use]
    pub fn line_total(&self) -> Amount {
        self.line_total
    }
}

/// The transaction being built.
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    member: Member,
}

impl Cart {
    /// An empty cart for the walk-in buyer.
    #[must_use]
    pub fn new() -> Self {
        Self::for_member(Member::walk_in())
    }

    /// An empty cart for the given buyer.
    #[must_use]
    pub fn for_member(member: Member) -> Self {
        Cart {
            lines: Vec::new(),
            member,
        }
    }

    /// The buyer for this transaction.
    #[must_use]
    pub fn member(&self) -> &Member {
        &self.member
    }

    /// Changes the buyer.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MemberLocked`] once any line exists.
    pub fn set_member(&mut self, member: Member) -> Result<(), CartError> {
        if !self.lines.is_empty() {
            return Err(CartError::MemberLocked);
        }

        self.member = member;
        Ok(())
    }

    /// Adds a product, or bumps the quantity when a line already exists.
    ///
    /// `None` means nothing is selected in the picker; it is a no-op, not an
    /// error.
    pub fn add_product(&mut self, product: Option<&Product>, sink: &mut dyn NotificationSink) {
        let Some(product) = product else { return };

        let existing = self.get_line(product.id).map(CartLine::quantity);
        if let Some(quantity) = existing {
            self.set_quantity(product.id, quantity.saturating_add(1), sink);
            return;
        }

        let pricing = product.pricing.clone();
        let resolved = resolve_unit_price(&pricing, 1, self.member.id, None);

        let mut line = CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit: product.unit.clone(),
            pricing,
            quantity: 1,
            unit_price: resolved.unit_price,
            origin: PriceOrigin::Regular,
            manual_price: None,
            line_total: from_minor(0),
        };

        debug!(product = %line.name, "line added");
        Self::apply(&mut line, 1, resolved, sink);

        self.lines.push(line);
    }

    /// Sets a line's quantity.
    ///
    /// Values below 1 clamp to 1; unknown ids are a no-op. The resolver runs
    /// again because volume-tier eligibility depends on quantity.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32, sink: &mut dyn NotificationSink) {
        let member = self.member.id;

        let Some(line) = self.lines.iter_mut().find(|line| line.product_id == id) else {
            return;
        };

        let quantity = quantity.max(1);
        let resolved = resolve_unit_price(&line.pricing, quantity, member, line.manual_price);

        Self::apply(line, quantity, resolved, sink);
    }

    /// Removes a line. Removing an unknown id is a no-op.
    pub fn remove_line(&mut self, id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != id);

        if self.lines.len() != before {
            debug!(product_id = id.0, "line removed");
        }
    }

    /// Sets a sticky manual unit price on a line.
    ///
    /// The override survives quantity changes until the line is removed or
    /// [`clear_manual_price`](Self::clear_manual_price) is called. Negative
    /// prices and unknown ids are ignored.
    pub fn set_manual_price(
        &mut self,
        id: ProductId,
        price: Amount,
        sink: &mut dyn NotificationSink,
    ) {
        if price.to_minor_units() < 0 {
            return;
        }

        let member = self.member.id;

        let Some(line) = self.lines.iter_mut().find(|line| line.product_id == id) else {
            return;
        };

        line.manual_price = Some(price);

        let quantity = line.quantity;
        let resolved = resolve_unit_price(&line.pricing, quantity, member, line.manual_price);

        Self::apply(line, quantity, resolved, sink);
    }

    /// Clears the manual override and returns the line to automatic pricing.
    ///
    /// A no-op when the line has no override or the id is unknown.
    pub fn clear_manual_price(&mut self, id: ProductId, sink: &mut dyn NotificationSink) {
        let member = self.member.id;

        let Some(line) = self.lines.iter_mut().find(|line| line.product_id == id) else {
            return;
        };

        if line.manual_price.take().is_none() {
            return;
        }

        let quantity = line.quantity;
        let resolved = resolve_unit_price(&line.pricing, quantity, member, None);

        Self::apply(line, quantity, resolved, sink);
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn grand_total(&self) -> Amount {
        let minor = self.lines.iter().fold(0_i64, |acc, line| {
            acc.saturating_add(line.line_total.to_minor_units())
        });

        from_minor(minor)
    }

    /// Number of distinct lines, not total quantity.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The lines in display (insertion) order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by product id.
    #[must_use]
    pub fn get_line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Snapshot of the finished transaction for the submission client.
    #[must_use]
    pub fn finish(&self) -> SaleDraft {
        SaleDraft {
            member_id: self.member.id,
            member_name: self.member.name.clone(),
            lines: self
                .lines
                .iter()
                .map(|line| SaleLine {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price_minor: line.unit_price.to_minor_units(),
                    origin: line.origin,
                    line_total_minor: line.line_total.to_minor_units(),
                })
                .collect(),
            total_minor: self.grand_total().to_minor_units(),
            line_count: self.line_count(),
        }
    }

    /// Writes a resolved price and quantity to a line, keeping `line_total`
    /// consistent, and notifies once when the price origin changed.
    fn apply(
        line: &mut CartLine,
        quantity: u32,
        resolved: ResolvedPrice,
        sink: &mut dyn NotificationSink,
    ) {
        let previous = line.origin;

        line.quantity = quantity;
        line.unit_price = resolved.unit_price;
        line.origin = resolved.origin;
        line.line_total = line_total(resolved.unit_price, quantity);

        debug!(
            product = %line.name,
            quantity,
            price = %line.unit_price,
            origin = %line.origin,
            "line repriced"
        );

        if previous != resolved.origin {
            sink.notify(Notice::info(format!(
                "Using {} price for {}",
                resolved.origin, line.name
            )));
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Line subtotal, saturating on overflow so cart operations stay total.
fn line_total(unit_price: Amount, quantity: u32) -> Amount {
    from_minor(
        unit_price
            .to_minor_units()
            .saturating_mul(i64::from(quantity)),
    )
}

/// A finished transaction, ready to hand to the submission client.
#[derive(Debug, Clone, Serialize)]
pub struct SaleDraft {
    /// Buyer id.
    pub member_id: MemberId,

    /// Buyer display name.
    pub member_name: String,

    /// Sold lines in display order.
    pub lines: Vec<SaleLine>,

    /// Grand total in minor units.
    pub total_minor: i64,

    /// Number of distinct lines.
    pub line_count: usize,
}

/// One sold line within a [`SaleDraft`].
#[derive(Debug, Clone, Serialize)]
pub struct SaleLine {
    /// Product id.
    pub product_id: ProductId,

    /// Product name at sale time.
    pub name: String,

    /// Quantity sold.
    pub quantity: u32,

    /// Effective unit price in minor units.
    pub unit_price_minor: i64,

    /// Rule that produced the unit price.
    pub origin: PriceOrigin,

    /// Line subtotal in minor units.
    pub line_total_minor: i64,
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use crate::{
        catalog::{MemberPrice, VolumeTier},
        money::rupiah,
        notify::{NullSink, ToastQueue},
    };

    use super::*;

    fn plain_product(id: u64, name: &str, harga: i64) -> Product {
        Product {
            id: ProductId(id),
            name: name.to_string(),
            unit: "pcs".to_string(),
            cost: rupiah(0),
            expiry: String::new(),
            barcode: String::new(),
            note: String::new(),
            pricing: ProductPricing::regular(rupiah(harga)),
        }
    }

    #[test]
    fn new_cart_belongs_to_walk_in() {
        let cart = Cart::new();

        assert!(cart.member().id.is_walk_in());
        assert!(cart.is_empty());
        assert_eq!(cart.grand_total(), rupiah(0));
    }

    #[test]
    fn add_none_is_a_no_op() {
        let mut cart = Cart::new();

        cart.add_product(None, &mut NullSink);

        assert!(cart.is_empty());
    }

    #[test]
    fn re_adding_a_product_bumps_quantity_instead_of_duplicating() {
        let mut cart = Cart::new();
        let product = plain_product(1, "Sabun Mandi", 5_000);

        cart.add_product(Some(&product), &mut NullSink);
        cart.add_product(Some(&product), &mut NullSink);
        cart.add_product(Some(&product), &mut NullSink);

        assert_eq!(cart.line_count(), 1);
        assert!(cart.get_line(ProductId(1)).is_some_and(|l| l.quantity() == 3));
        assert_eq!(cart.grand_total(), rupiah(15_000));
    }

    #[test]
    fn quantity_below_one_clamps_to_one() {
        let mut cart = Cart::new();
        let product = plain_product(1, "Sabun Mandi", 5_000);

        cart.add_product(Some(&product), &mut NullSink);
        cart.set_quantity(ProductId(1), 0, &mut NullSink);

        assert!(cart.get_line(ProductId(1)).is_some_and(|l| l.quantity() == 1));
    }

    #[test]
    fn set_quantity_for_unknown_id_is_a_no_op() {
        let mut cart = Cart::new();

        cart.set_quantity(ProductId(99), 5, &mut NullSink);

        assert!(cart.is_empty());
    }

    #[test]
    fn removing_unknown_line_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let product = plain_product(1, "Sabun Mandi", 5_000);

        cart.add_product(Some(&product), &mut NullSink);
        cart.remove_line(ProductId(42));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.grand_total(), rupiah(5_000));
    }

    #[test]
    fn line_total_tracks_quantity_and_price() {
        let mut cart = Cart::new();
        let product = plain_product(1, "Sabun Mandi", 5_000);

        cart.add_product(Some(&product), &mut NullSink);
        cart.set_quantity(ProductId(1), 7, &mut NullSink);

        let line = cart.get_line(ProductId(1));
        assert!(line.is_some_and(|l| l.line_total() == rupiah(35_000)));
        assert_eq!(cart.grand_total(), rupiah(35_000));
    }

    #[test]
    fn member_is_locked_once_lines_exist() {
        let mut cart = Cart::new();
        let product = plain_product(1, "Sabun Mandi", 5_000);

        let before = cart.set_member(Member {
            id: MemberId(1),
            name: "Ibu Sari".to_string(),
        });
        assert_eq!(before, Ok(()));

        cart.add_product(Some(&product), &mut NullSink);

        let after = cart.set_member(Member::walk_in());
        assert_eq!(after, Err(CartError::MemberLocked));
        assert_eq!(cart.member().id, MemberId(1));
    }

    #[test]
    fn negative_manual_price_is_ignored() {
        let mut cart = Cart::new();
        let product = plain_product(1, "Sabun Mandi", 5_000);

        cart.add_product(Some(&product), &mut NullSink);
        cart.set_manual_price(ProductId(1), rupiah(-100), &mut NullSink);

        let line = cart.get_line(ProductId(1));
        assert!(line.is_some_and(|l| l.manual_price().is_none()));
        assert!(line.is_some_and(|l| l.unit_price() == rupiah(5_000)));
    }

    #[test]
    fn manual_price_survives_quantity_changes() {
        let mut cart = Cart::new();
        let mut product = plain_product(1, "Sabun Mandi", 5_000);
        product.pricing.volume_tiers = smallvec![VolumeTier {
            min_qty: 3,
            price: rupiah(4_500),
        }];

        cart.add_product(Some(&product), &mut NullSink);
        cart.set_manual_price(ProductId(1), rupiah(4_800), &mut NullSink);
        cart.set_quantity(ProductId(1), 10, &mut NullSink);

        let line = cart.get_line(ProductId(1));
        assert!(line.is_some_and(|l| l.unit_price() == rupiah(4_800)));
        assert!(line.is_some_and(|l| l.origin() == PriceOrigin::Manual));
        assert_eq!(cart.grand_total(), rupiah(48_000));
    }

    #[test]
    fn clearing_manual_price_returns_to_automatic_pricing() {
        let mut cart = Cart::new();
        let mut product = plain_product(1, "Sabun Mandi", 5_000);
        product.pricing.volume_tiers = smallvec![VolumeTier {
            min_qty: 3,
            price: rupiah(4_500),
        }];

        cart.add_product(Some(&product), &mut NullSink);
        cart.set_quantity(ProductId(1), 4, &mut NullSink);
        cart.set_manual_price(ProductId(1), rupiah(4_800), &mut NullSink);
        cart.clear_manual_price(ProductId(1), &mut NullSink);

        let line = cart.get_line(ProductId(1));
        assert!(line.is_some_and(|l| l.origin() == PriceOrigin::Grosir));
        assert!(line.is_some_and(|l| l.unit_price() == rupiah(4_500)));
    }

    #[test]
    fn member_price_applies_at_add_time_and_notifies() {
        let mut cart = Cart::for_member(Member {
            id: MemberId(2),
            name: "Pak Budi".to_string(),
        });

        let mut product = plain_product(1, "Sabun Mandi", 5_000);
        product.pricing.member_prices = smallvec![MemberPrice {
            member_id: MemberId(2),
            price: rupiah(4_750),
        }];

        let mut toasts = ToastQueue::new();
        cart.add_product(Some(&product), &mut toasts);

        let line = cart.get_line(ProductId(1));
        assert!(line.is_some_and(|l| l.origin() == PriceOrigin::Member));
        assert!(line.is_some_and(|l| l.unit_price() == rupiah(4_750)));

        let drained = toasts.drain();
        assert_eq!(drained.len(), 1);
        assert!(
            drained
                .first()
                .is_some_and(|n| n.message == "Using member price for Sabun Mandi")
        );
    }

    #[test]
    fn finish_captures_lines_totals_and_origins() {
        let mut cart = Cart::new();
        let product = plain_product(1, "Sabun Mandi", 5_000);

        cart.add_product(Some(&product), &mut NullSink);
        cart.set_quantity(ProductId(1), 2, &mut NullSink);

        let draft = cart.finish();

        assert_eq!(draft.member_id, MemberId::WALK_IN);
        assert_eq!(draft.line_count, 1);
        assert_eq!(draft.total_minor, rupiah(10_000).to_minor_units());
        assert!(
            draft
                .lines
                .first()
                .is_some_and(|l| l.origin == PriceOrigin::Regular && l.quantity == 2)
        );
    }
}
