//! Manual price entry
//!
//! Transient editing state for the "Harga Satuan" column: the cashier
//! focuses a price cell, types digits, and the value is committed on blur.
//! A committed value becomes a sticky manual override on the cart line;
//! anything unparseable leaves the line exactly as it was.

use rustc_hash::FxHashMap;

use crate::{
    cart::Cart,
    catalog::ProductId,
    money::{Amount, rupiah, to_rupiah},
    notify::NotificationSink,
};

/// In-progress edit of one line's unit price.
#[derive(Debug, Clone)]
struct EditState {
    /// Text typed so far, digits only.
    input: String,
}

/// Editing state for manual unit prices, keyed by product id.
///
/// Lives alongside the cart rather than inside it: the buffer is a property
/// of the focused input cell, not of the transaction.
#[derive(Debug, Default)]
pub struct ManualPriceEditor {
    edits: FxHashMap<ProductId, EditState>,
}

impl ManualPriceEditor {
    /// An editor with no edits in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins editing a line, seeding the buffer with the current price.
    pub fn begin(&mut self, id: ProductId, current: Amount) {
        self.edits.insert(
            id,
            EditState {
                input: to_rupiah(&current).to_string(),
            },
        );
    }

    /// Records typed input for a line, keeping digits only.
    ///
    /// Input for a line that is not being edited is discarded.
    pub fn input(&mut self, id: ProductId, text: &str) {
        if let Some(edit) = self.edits.get_mut(&id) {
            edit.input = text.chars().filter(char::is_ascii_digit).collect();
        }
    }

    /// The text to display while a line is being edited.
    #[must_use]
    pub fn display(&self, id: ProductId) -> Option<&str> {
        self.edits.get(&id).map(|edit| edit.input.as_str())
    }

    /// Whether a line is currently being edited.
    #[must_use]
    pub fn is_editing(&self, id: ProductId) -> bool {
        self.edits.contains_key(&id)
    }

    /// Commits the edit on blur.
    ///
    /// A parseable value becomes the line's sticky manual price; anything
    /// else (including an emptied field) leaves the line untouched. The
    /// editing state is cleared either way.
    pub fn commit(&mut self, id: ProductId, cart: &mut Cart, sink: &mut dyn NotificationSink) {
        let Some(edit) = self.edits.remove(&id) else {
            return;
        };

        if let Ok(value) = edit.input.parse::<i64>() {
            cart.set_manual_price(id, rupiah(value), sink);
        }
    }
}
