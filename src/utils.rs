//! Utils

use clap::Parser;

/// Arguments for the cashier demo
#[derive(Debug, Parser)]
pub struct DemoCheckoutArgs {
    /// Fixture set to use for the catalog & members
    #[clap(short, long, default_value = "warung")]
    pub fixture: String,

    /// Member id to sell to (omit for the walk-in buyer)
    #[clap(short, long)]
    pub member: Option<u64>,
}
