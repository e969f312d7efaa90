#![doc(test(attr(deny(warnings))))]

//! Wallet Core is the ledger and analytics engine behind a personal-finance
//! tracker: exact money parsing, an observable transaction ledger, summary
//! statistics, monthly budget alerts and CSV export.

pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod utils;

pub use crate::core::session::WalletSession;
pub use currency::{Amount, AmountCodec};
pub use errors::LedgerError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Wallet Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
