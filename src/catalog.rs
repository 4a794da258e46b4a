//! Catalog
//!
//! Sellable products and the member roster. The cashier screen loads both
//! once per session and treats them as a read-only snapshot; nothing here
//! re-syncs mid-transaction.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::money::Amount;

new_key_type! {
    /// Product arena key
    pub struct ProductKey;
}

/// External product identifier, assigned by the catalog backend.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(pub u64);

/// External member identifier. Id `0` is reserved for the walk-in
/// pseudo-member and never matches a product's member prices.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl MemberId {
    /// The walk-in / general-public pseudo-member.
    pub const WALK_IN: MemberId = MemberId(0);

    /// Whether this is the walk-in pseudo-member.
    #[must_use]
    pub fn is_walk_in(self) -> bool {
        self == Self::WALK_IN
    }
}

/// A per-member override price attached to a product.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MemberPrice {
    /// Member the price applies to.
    pub member_id: MemberId,

    /// Unit price for that member.
    pub price: Amount,
}

/// A volume-discount ("harga grosir") tier.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VolumeTier {
    /// Minimum quantity at which the tier price applies.
    pub min_qty: u32,

    /// Unit price at or above the threshold.
    pub price: Amount,
}

/// The pricing inputs for one product.
///
/// Cloned into a cart line when the line is created, so catalog edits made
/// during a transaction never reprice lines that are already rung up.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPricing {
    /// Base unit price ("harga").
    pub list_price: Amount,

    /// Per-member override prices, at most one per member id by convention.
    pub member_prices: SmallVec<[MemberPrice; 2]>,

    /// Volume tiers, unordered as stored.
    pub volume_tiers: SmallVec<[VolumeTier; 2]>,
}

impl ProductPricing {
    /// Pricing with only a list price.
    #[must_use]
    pub fn regular(list_price: Amount) -> Self {
        Self {
            list_price,
            member_prices: SmallVec::new(),
            volume_tiers: SmallVec::new(),
        }
    }

    /// Looks up the override price for a member.
    ///
    /// The walk-in pseudo-member never matches, even if a data row carries
    /// member id 0.
    #[must_use]
    pub fn member_price(&self, member: MemberId) -> Option<Amount> {
        if member.is_walk_in() {
            return None;
        }

        self.member_prices
            .iter()
            .find(|mp| mp.member_id == member)
            .map(|mp| mp.price)
    }
}

/// A sellable product.
#[derive(Debug, Clone)]
pub struct Product {
    /// Backend identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit of sale ("satuan": pcs, kg, liter...).
    pub unit: String,

    /// Acquisition cost ("modal").
    pub cost: Amount,

    /// Expiry date as supplied by the backend.
    pub expiry: String,

    /// Barcode.
    pub barcode: String,

    /// Free-form note.
    pub note: String,

    /// Pricing inputs.
    pub pricing: ProductPricing,
}

/// A loyalty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Backend identifier; 0 is reserved for [`Member::walk_in`].
    pub id: MemberId,

    /// Display name.
    pub name: String,
}

impl Member {
    /// The "Umum" walk-in pseudo-member: a buyer with no loyalty record, and
    /// the only buyer category eligible for volume pricing.
    #[must_use]
    pub fn walk_in() -> Self {
        Self {
            id: MemberId::WALK_IN,
            name: "Umum".to_string(),
        }
    }
}

/// Read-only catalog snapshot: a product arena indexed by backend id, plus
/// the member roster.
#[derive(Debug, Default)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    index: FxHashMap<ProductId, ProductKey>,
    members: FxHashMap<MemberId, Member>,
}

impl Catalog {
    /// An empty catalog. Every cart operation stays total over it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a product, replacing any previous product with the same id.
    pub fn insert_product(&mut self, product: Product) -> ProductKey {
        if let Some(&key) = self.index.get(&product.id) {
            if let Some(slot) = self.products.get_mut(key) {
                *slot = product;
            }
            return key;
        }

        let id = product.id;
        let key = self.products.insert(product);
        self.index.insert(id, key);
        key
    }

    /// Adds a member to the roster, replacing any previous entry.
    pub fn insert_member(&mut self, member: Member) {
        self.members.insert(member.id, member);
    }

    /// Looks up a product by backend id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|key| self.products.get(*key))
    }

    /// Looks up a member by backend id.
    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    /// Iterates products in insertion order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Iterates the member roster.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
