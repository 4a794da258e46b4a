//! Pricing
//!
//! The pricing resolver for the cashier screen. Pure: given the pricing
//! snapshot of a line, the quantity, the buyer and an optional manual
//! override, it decides the effective unit price and tags it with the rule
//! that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{MemberId, ProductPricing, VolumeTier},
    money::Amount,
};

/// The rule that produced a unit price.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceOrigin {
    /// The cashier typed the price by hand.
    Manual,

    /// A per-member override price.
    Member,

    /// A volume ("grosir") tier price; walk-in buyers only.
    Grosir,

    /// The product's list price.
    Regular,
}

impl PriceOrigin {
    /// Badge text for table cells; regular prices carry no badge.
    #[must_use]
    pub fn badge(self) -> Option<&'static str> {
        match self {
            Self::Manual => Some("Manual"),
            Self::Member => Some("Member"),
            Self::Grosir => Some("Grosir"),
            Self::Regular => None,
        }
    }

    /// Lowercase label used in notices and sale drafts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Member => "member",
            Self::Grosir => "grosir",
            Self::Regular => "regular",
        }
    }
}

impl fmt::Display for PriceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved unit price and the rule that produced it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedPrice {
    /// Effective unit price.
    pub unit_price: Amount,

    /// Rule that produced it.
    pub origin: PriceOrigin,
}

/// Selects the volume tier that applies at `quantity`.
///
/// Picks the matching tier with the largest `min_qty`. Tiers are consulted in
/// storage order and no sorting is assumed; when two tiers carry the same
/// threshold the one stored later wins.
#[must_use]
pub fn best_volume_tier(tiers: &[VolumeTier], quantity: u32) -> Option<&VolumeTier> {
    tiers
        .iter()
        .filter(|tier| tier.min_qty <= quantity)
        .max_by_key(|tier| tier.min_qty)
}

/// Resolves the effective unit price for one cart line.
///
/// Strict precedence, first match wins: manual override, member price
/// (non-walk-in buyers only), volume tier (walk-in buyers only), list price.
/// Member and volume pricing never combine: a member buyer is never offered
/// grosir tiers.
#[must_use]
pub fn resolve_unit_price(
    pricing: &ProductPricing,
    quantity: u32,
    member: MemberId,
    manual_price: Option<Amount>,
) -> ResolvedPrice {
    if let Some(price) = manual_price {
        return ResolvedPrice {
            unit_price: price,
            origin: PriceOrigin::Manual,
        };
    }

    if let Some(price) = pricing.member_price(member) {
        return ResolvedPrice {
            unit_price: price,
            origin: PriceOrigin::Member,
        };
    }

    if member.is_walk_in()
        && let Some(tier) = best_volume_tier(&pricing.volume_tiers, quantity)
    {
        return ResolvedPrice {
            unit_price: tier.price,
            origin: PriceOrigin::Grosir,
        };
    }

    ResolvedPrice {
        unit_price: pricing.list_price,
        origin: PriceOrigin::Regular,
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use crate::{catalog::MemberPrice, money::rupiah};

    use super::*;

    fn tiered_pricing() -> ProductPricing {
        ProductPricing {
            list_price: rupiah(100),
            member_prices: smallvec![MemberPrice {
                member_id: MemberId(1),
                price: rupiah(95),
            }],
            volume_tiers: smallvec![
                VolumeTier {
                    min_qty: 10,
                    price: rupiah(80),
                },
                VolumeTier {
                    min_qty: 5,
                    price: rupiah(90),
                },
            ],
        }
    }

    #[test]
    fn manual_price_wins_over_everything() {
        let resolved = resolve_unit_price(&tiered_pricing(), 10, MemberId(1), Some(rupiah(42)));

        assert_eq!(resolved.unit_price, rupiah(42));
        assert_eq!(resolved.origin, PriceOrigin::Manual);
    }

    #[test]
    fn member_price_wins_over_matching_volume_tier() {
        // Quantity 10 would qualify for the 80-rupiah tier, but tiers never
        // apply to member buyers.
        let resolved = resolve_unit_price(&tiered_pricing(), 10, MemberId(1), None);

        assert_eq!(resolved.unit_price, rupiah(95));
        assert_eq!(resolved.origin, PriceOrigin::Member);
    }

    #[test]
    fn member_without_override_falls_back_to_regular() {
        let resolved = resolve_unit_price(&tiered_pricing(), 10, MemberId(3), None);

        assert_eq!(resolved.unit_price, rupiah(100));
        assert_eq!(resolved.origin, PriceOrigin::Regular);
    }

    #[test]
    fn walk_in_gets_best_matching_tier() {
        let pricing = tiered_pricing();

        let below = resolve_unit_price(&pricing, 4, MemberId::WALK_IN, None);
        let first = resolve_unit_price(&pricing, 5, MemberId::WALK_IN, None);
        let second = resolve_unit_price(&pricing, 12, MemberId::WALK_IN, None);

        assert_eq!(
            (below.unit_price, below.origin),
            (rupiah(100), PriceOrigin::Regular)
        );
        assert_eq!(
            (first.unit_price, first.origin),
            (rupiah(90), PriceOrigin::Grosir)
        );
        assert_eq!(
            (second.unit_price, second.origin),
            (rupiah(80), PriceOrigin::Grosir)
        );
    }

    #[test]
    fn best_volume_tier_ignores_unmatched_thresholds() {
        let pricing = tiered_pricing();

        assert_eq!(best_volume_tier(&pricing.volume_tiers, 4), None);
        assert_eq!(
            best_volume_tier(&pricing.volume_tiers, 7).map(|t| t.min_qty),
            Some(5)
        );
        assert_eq!(
            best_volume_tier(&pricing.volume_tiers, 10).map(|t| t.min_qty),
            Some(10)
        );
    }

    #[test]
    fn no_tiers_resolves_regular_for_walk_in() {
        let pricing = ProductPricing::regular(rupiah(100));
        let resolved = resolve_unit_price(&pricing, 50, MemberId::WALK_IN, None);

        assert_eq!(resolved.unit_price, rupiah(100));
        assert_eq!(resolved.origin, PriceOrigin::Regular);
    }

    #[test]
    fn origin_badges_and_labels() {
        assert_eq!(PriceOrigin::Member.badge(), Some("Member"));
        assert_eq!(PriceOrigin::Grosir.badge(), Some("Grosir"));
        assert_eq!(PriceOrigin::Manual.badge(), Some("Manual"));
        assert_eq!(PriceOrigin::Regular.badge(), None);
        assert_eq!(PriceOrigin::Grosir.to_string(), "grosir");
    }
}
