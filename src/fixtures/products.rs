//! Product Fixtures

use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    catalog::{MemberId, MemberPrice, Product, ProductId, ProductPricing, VolumeTier},
    fixtures::FixtureError,
    money::{Amount, rupiah},
};

/// Products fixture file
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Product entries
    pub products: Vec<ProductFixture>,
}

/// One product entry in a fixture file; prices are whole rupiah.
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Backend id
    pub id: u64,

    /// Display name
    pub name: String,

    /// Unit of sale
    pub satuan: String,

    /// List price
    pub harga: i64,

    /// Acquisition cost
    #[serde(default)]
    pub modal: i64,

    /// Expiry date
    #[serde(default)]
    pub expired: String,

    /// Barcode
    #[serde(default)]
    pub barcode: String,

    /// Free-form note
    #[serde(default)]
    pub note: String,

    /// Member override prices
    #[serde(default)]
    pub member_prices: Vec<MemberPriceFixture>,

    /// Volume tiers
    #[serde(default)]
    pub harga_grosir: Vec<VolumeTierFixture>,
}

/// Member price entry
#[derive(Debug, Deserialize)]
pub struct MemberPriceFixture {
    /// Member id
    pub member_id: u64,

    /// Price for that member
    pub harga: i64,
}

/// Volume tier entry
#[derive(Debug, Deserialize)]
pub struct VolumeTierFixture {
    /// Minimum quantity
    pub min_qty: u32,

    /// Tier price
    pub harga: i64,
}

/// Validates a whole-rupiah fixture price.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] for negative values.
pub fn parse_price(value: i64) -> Result<Amount, FixtureError> {
    if value < 0 {
        return Err(FixtureError::InvalidPrice(value));
    }

    Ok(rupiah(value))
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let member_prices = fixture
            .member_prices
            .into_iter()
            .map(|mp| {
                Ok(MemberPrice {
                    member_id: MemberId(mp.member_id),
                    price: parse_price(mp.harga)?,
                })
            })
            .collect::<Result<SmallVec<[MemberPrice; 2]>, FixtureError>>()?;

        let volume_tiers = fixture
            .harga_grosir
            .into_iter()
            .map(|tier| {
                Ok(VolumeTier {
                    min_qty: tier.min_qty,
                    price: parse_price(tier.harga)?,
                })
            })
            .collect::<Result<SmallVec<[VolumeTier; 2]>, FixtureError>>()?;

        Ok(Product {
            id: ProductId(fixture.id),
            name: fixture.name,
            unit: fixture.satuan,
            cost: parse_price(fixture.modal)?,
            expiry: fixture.expired,
            barcode: fixture.barcode,
            note: fixture.note,
            pricing: ProductPricing {
                list_price: parse_price(fixture.harga)?,
                member_prices,
                volume_tiers,
            },
        })
    }
}
