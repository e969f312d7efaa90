#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;
use wallet_core::{
    config::{Config, ConfigManager},
    core::time::FixedClock,
    WalletSession,
};

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, 0)
        .expect("valid time")
}

pub fn fixed_clock(y: i32, m: u32, d: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(at(y, m, d, 9, 0)))
}

/// Default settings without the demonstration transactions.
pub fn empty_config() -> Config {
    Config {
        seed_sample_data: false,
        ..Config::default()
    }
}

/// Session starting empty on 2025-10-20.
pub fn empty_session() -> (WalletSession, Arc<FixedClock>) {
    let clock = fixed_clock(2025, 10, 20);
    let session =
        WalletSession::with_clock(&empty_config(), clock.clone()).expect("create session");
    (session, clock)
}

/// Config manager rooted in a fresh temporary directory; keep the guard alive.
pub fn temp_config_manager() -> (ConfigManager, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let manager =
        ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("create config manager");
    (manager, temp)
}
