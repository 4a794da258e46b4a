//! Cashier Demo
//!
//! Walks one transaction through the register: load a fixture catalog, ring
//! up a few products, commit a manual price, and print the receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-m` to sell to a member id instead of the walk-in buyer

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kasir::{
    cart::Cart,
    catalog::{Member, ProductId},
    fixtures::Fixture,
    manual::ManualPriceEditor,
    notify::ToastQueue,
    receipt::Receipt,
    utils::DemoCheckoutArgs,
};

/// Cashier Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = DemoCheckoutArgs::parse();
    let fixture = Fixture::from_set(&args.fixture)?;

    let member = match args.member {
        Some(id) => fixture.member(id)?.clone(),
        None => Member::walk_in(),
    };

    let mut cart = Cart::for_member(member);
    let mut toasts = ToastQueue::new();
    let mut editor = ManualPriceEditor::new();

    let catalog = fixture.catalog();

    // Ring up some beras (enough for the grosir tier) and a bottle of oil.
    for id in [1_u64, 1, 1, 2] {
        cart.add_product(catalog.product(ProductId(id)), &mut toasts);
    }
    cart.set_quantity(ProductId(1), 5, &mut toasts);

    // Haggle the oil down by hand.
    let current = cart.get_line(ProductId(2)).map(|line| line.unit_price());
    if let Some(price) = current {
        editor.begin(ProductId(2), price);
        editor.input(ProductId(2), "17.000");
        editor.commit(ProductId(2), &mut cart, &mut toasts);
    }

    for notice in toasts.drain() {
        println!("[{}] {}", notice.level, notice.message);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::from_cart(&cart).write_to(&mut handle)?;

    println!("\nTotal Items: {}", cart.line_count());

    Ok(())
}
