//! Kasir prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, SaleDraft, SaleLine},
    catalog::{
        Catalog, Member, MemberId, MemberPrice, Product, ProductId, ProductKey, ProductPricing,
        VolumeTier,
    },
    fixtures::{Fixture, FixtureError},
    manual::ManualPriceEditor,
    money::{Amount, rupiah},
    notify::{Notice, NoticeLevel, NotificationSink, NullSink, ToastQueue},
    prefs::{Preferences, PrefsError, RegisterMode, SidebarState, Theme, ThemeSetting},
    pricing::{PriceOrigin, ResolvedPrice, best_volume_tier, resolve_unit_price},
    receipt::{Receipt, ReceiptError},
    search::{SearchSession, SearchTicket, search_products},
};
