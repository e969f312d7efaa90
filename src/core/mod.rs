//! Services, session wiring and time sources built on top of the ledger.

pub mod services;
pub mod session;
pub mod time;
