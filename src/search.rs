//! Product search
//!
//! Search-as-you-type over the catalog for the product picker. Matching is
//! fuzzy over the product name and id: prefix, then substring, then in-order
//! subsequence. Result delivery is guarded by a generation ticket so a stale
//! response can never overwrite a newer one; debounce timing itself belongs
//! to the embedding UI, which owns the clock.

use crate::catalog::{Catalog, Product, ProductId};

/// Products matching `query`, best matches first.
///
/// An empty (or whitespace) query returns the whole catalog in insertion
/// order. Matching is case-insensitive.
#[must_use]
pub fn search_products<'c>(catalog: &'c Catalog, query: &str) -> Vec<&'c Product> {
    let query = query.trim();

    if query.is_empty() {
        return catalog.products().collect();
    }

    let needle = query.to_lowercase();

    let mut scored: Vec<(u8, &Product)> = catalog
        .products()
        .filter_map(|product| score(product, &needle).map(|rank| (rank, product)))
        .collect();

    scored.sort_by_key(|(rank, product)| (*rank, product.id));

    scored.into_iter().map(|(_, product)| product).collect()
}

/// Match rank for one product, best (lowest) first; `None` is no match.
fn score(product: &Product, needle: &str) -> Option<u8> {
    let name = product.name.to_lowercase();

    if name.starts_with(needle) {
        return Some(0);
    }

    if product.id.0.to_string().starts_with(needle) {
        return Some(1);
    }

    if name.contains(needle) {
        return Some(2);
    }

    if is_subsequence(needle, &name) {
        return Some(3);
    }

    None
}

/// Whether every character of `needle` appears in `haystack` in order.
fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut haystack = haystack.chars();

    needle
        .chars()
        .all(|wanted| haystack.by_ref().any(|found| found == wanted))
}

/// Ticket identifying one issued search request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Latest-wins holder for asynchronously computed search results.
///
/// The picker issues a ticket per request; whichever computation finishes
/// delivers its results together with the ticket it was given, and only the
/// most recently issued ticket is accepted. Results arriving for a
/// superseded ticket are discarded, so earlier in-flight searches can never
/// clobber the visible state.
#[derive(Debug, Default)]
pub struct SearchSession {
    current: u64,
    results: Vec<ProductId>,
}

impl SearchSession {
    /// A session with no request issued and no results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new request, superseding all earlier ones.
    pub fn issue(&mut self) -> SearchTicket {
        self.current = self.current.wrapping_add(1);
        SearchTicket(self.current)
    }

    /// Delivers results for a ticket.
    ///
    /// Returns whether the results were applied; results for superseded
    /// tickets are discarded.
    pub fn accept(&mut self, ticket: SearchTicket, results: Vec<ProductId>) -> bool {
        if ticket.0 != self.current {
            return false;
        }

        self.results = results;
        true
    }

    /// The most recently applied results.
    #[must_use]
    pub fn results(&self) -> &[ProductId] {
        &self.results
    }
}
