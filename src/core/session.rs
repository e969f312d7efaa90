//! Wires a ledger to its derived views so every mutation refreshes them inline.

use std::{cell::RefCell, path::Path, rc::Rc, sync::Arc};

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    config::Config,
    core::{
        services::{
            BudgetStatus, BudgetTracker, ExportRecord, LedgerExporter, LedgerSummary,
            SummaryService,
        },
        time::{Clock, SystemClock},
    },
    currency::{Amount, AmountCodec},
    errors::Result,
    ledger::{Direction, Ledger, SeedEntry, SubscriptionId, Transaction},
};

/// One running wallet: the ledger plus the budget and analytics views that follow it.
#[derive(Debug)]
pub struct WalletSession {
    ledger: Ledger,
    codec: AmountCodec,
    budget: Rc<RefCell<BudgetTracker>>,
    summary: Rc<RefCell<LedgerSummary>>,
}

impl WalletSession {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let mut ledger = Ledger::with_clock(config.catalog()?, clock.clone());
        let budget = Rc::new(RefCell::new(BudgetTracker::new(clock)));
        if let Some(limit) = config.monthly_budget {
            budget.borrow_mut().set_limit(limit)?;
        }
        let summary = Rc::new(RefCell::new(LedgerSummary::default()));

        let tracker = Rc::clone(&budget);
        ledger.subscribe(move |snapshot| {
            tracker.borrow_mut().on_ledger_changed(snapshot);
        });
        let latest = Rc::clone(&summary);
        let history_months = config.history_months;
        ledger.subscribe(move |snapshot| {
            *latest.borrow_mut() = SummaryService::summarize(snapshot, history_months);
        });

        let mut session = Self {
            ledger,
            codec: config.codec(),
            budget,
            summary,
        };
        if config.seed_sample_data {
            session.seed_sample_data()?;
        }
        Ok(session)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn codec(&self) -> &AmountCodec {
        &self.codec
    }

    /// Parses `raw_amount` and appends it; a parse failure leaves the ledger untouched.
    pub fn add_transaction(
        &mut self,
        raw_amount: &str,
        category: &str,
        description: &str,
        direction: Direction,
    ) -> Result<Transaction> {
        let amount = self.codec.parse(raw_amount)?;
        self.ledger.append(amount, category, description, direction)
    }

    pub fn clear(&mut self) {
        self.ledger.clear();
    }

    /// Parses and applies a new monthly limit.
    pub fn set_budget_limit(&mut self, raw_limit: &str) -> Result<BudgetStatus> {
        let limit = self.codec.parse(raw_limit)?;
        self.budget.borrow_mut().set_limit(limit)
    }

    pub fn budget_status(&self) -> BudgetStatus {
        self.budget.borrow().current_state()
    }

    pub fn summary(&self) -> LedgerSummary {
        self.summary.borrow().clone()
    }

    pub fn balance(&self) -> Amount {
        self.ledger.balance()
    }

    pub fn export(&self) -> Result<Vec<ExportRecord>> {
        LedgerExporter::export(self.ledger.snapshot())
    }

    pub fn export_to_path(&self, path: &Path) -> Result<usize> {
        LedgerExporter::export_to_path(self.ledger.snapshot(), path)
    }

    /// Registers an extra observer after the built-in budget and summary views.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&[Transaction]) + 'static,
    {
        self.ledger.subscribe(handler)
    }

    /// Loads caller-supplied history; nothing is appended if any entry is invalid.
    pub fn seed_entries<I>(&mut self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = SeedEntry>,
    {
        self.ledger.seed(entries)
    }

    pub fn seed_sample_data(&mut self) -> Result<usize> {
        self.seed_entries(sample_entries())
    }
}

fn sample_at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(h, min, 0)
}

/// Demonstration activity spanning three months.
pub fn sample_entries() -> Vec<SeedEntry> {
    let rows: [(i64, &str, &str, (i32, u32, u32, u32, u32)); 10] = [
        (250_000, "Salary", "Monthly salary", (2025, 10, 1, 9, 0)),
        (-35_050, "Food", "Grocery shopping", (2025, 10, 5, 16, 30)),
        (-12_000, "Shopping", "Clothes", (2025, 10, 15, 14, 20)),
        (-8_500, "Entertainment", "Movie tickets", (2025, 10, 10, 20, 15)),
        (250_000, "Salary", "Monthly salary", (2025, 9, 1, 9, 0)),
        (-42_075, "Food", "Grocery shopping", (2025, 10, 5, 16, 30)),
        (-15_000, "Bills", "Electricity bill", (2025, 10, 10, 12, 0)),
        (250_000, "Salary", "Monthly salary", (2025, 8, 1, 9, 0)),
        (-38_025, "Food", "Grocery shopping", (2025, 9, 5, 16, 30)),
        (-20_000, "Healthcare", "Doctor visit", (2025, 9, 10, 10, 30)),
    ];
    rows.iter()
        .filter_map(|(cents, category, description, (y, m, d, h, min))| {
            sample_at(*y, *m, *d, *h, *min).map(|timestamp| {
                SeedEntry::new(Amount::from_cents(*cents), *category, *description, timestamp)
            })
        })
        .collect()
}
