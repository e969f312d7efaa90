//! Ledger domain models: transactions, categories and the append-only store.

pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::CategoryCatalog;
pub use ledger::{Ledger, LedgerObserver, SubscriptionId};
pub use transaction::{Direction, SeedEntry, Transaction, TIMESTAMP_FORMAT};
