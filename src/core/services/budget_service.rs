//! Monthly budget tracking with threshold-based alert levels.

use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use serde::Serialize;

use super::summary_service::SummaryService;
use crate::{
    core::time::Clock,
    currency::Amount,
    errors::{LedgerError, Result},
    ledger::Transaction,
};

/// Discrete budget consumption level, highest priority first.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    Unset,
    Exceeded,
    Critical90,
    Notice75,
    HalfUsed,
    OnTrack,
}

const THRESHOLDS: [(i64, AlertLevel); 4] = [
    (100, AlertLevel::Exceeded),
    (90, AlertLevel::Critical90),
    (75, AlertLevel::Notice75),
    (50, AlertLevel::HalfUsed),
];

impl AlertLevel {
    /// Pure classification of `spent` against `limit`.
    pub fn evaluate(limit: Amount, spent: Amount) -> AlertLevel {
        if !limit.is_positive() {
            return AlertLevel::Unset;
        }
        let Some(spent_scaled) = spent.as_decimal().checked_mul(Decimal::ONE_HUNDRED) else {
            return AlertLevel::Exceeded;
        };
        THRESHOLDS
            .iter()
            .find(|(threshold, _)| {
                limit
                    .as_decimal()
                    .checked_mul(Decimal::from(*threshold))
                    .is_some_and(|bound| spent_scaled >= bound)
            })
            .map(|(_, level)| *level)
            .unwrap_or(AlertLevel::OnTrack)
    }

    pub fn message(&self) -> &'static str {
        match self {
            AlertLevel::Unset => "Set a monthly budget to start tracking.",
            AlertLevel::Exceeded => "ALERT: You have exceeded your monthly budget!",
            AlertLevel::Critical90 => "WARNING: You have used 90% of your budget.",
            AlertLevel::Notice75 => "NOTICE: You have used 75% of your budget.",
            AlertLevel::HalfUsed => "Heads-up: 50% of your budget is used.",
            AlertLevel::OnTrack => "You're within your budget. Keep it up!",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertLevel::Unset => "Unset",
            AlertLevel::Exceeded => "Exceeded",
            AlertLevel::Critical90 => "Critical90",
            AlertLevel::Notice75 => "Notice75",
            AlertLevel::HalfUsed => "HalfUsed",
            AlertLevel::OnTrack => "OnTrack",
        };
        f.write_str(label)
    }
}

/// Stored budget inputs; `spent` always comes from the latest ledger snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetState {
    pub monthly_limit: Amount,
    pub period_key: String,
    pub spent: Amount,
}

/// Read model handed to the budget view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub limit: Amount,
    pub spent: Amount,
    pub remaining: Amount,
    /// Share of the limit consumed, rounded to two decimals; zero while unset.
    pub percent: Decimal,
    pub level: AlertLevel,
    pub period_key: String,
}

/// Compares current-month spending against a monthly limit.
pub struct BudgetTracker {
    state: BudgetState,
    clock: Arc<dyn Clock>,
}

impl BudgetTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let period_key = SummaryService::month_key(&clock.now());
        Self {
            state: BudgetState {
                monthly_limit: Amount::ZERO,
                period_key,
                spent: Amount::ZERO,
            },
            clock,
        }
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    /// Replaces the monthly limit. Non-positive values are rejected and change nothing.
    pub fn set_limit(&mut self, value: Amount) -> Result<BudgetStatus> {
        if !value.is_positive() {
            tracing::warn!(limit = %value, "rejected non-positive budget limit");
            return Err(LedgerError::Validation(
                "monthly budget must be a positive amount".into(),
            ));
        }
        self.state.monthly_limit = value;
        let status = self.current_state();
        tracing::info!(limit = %value, level = %status.level, "monthly budget set");
        Ok(status)
    }

    /// Recomputes this month's spending from scratch.
    pub fn on_ledger_changed(&mut self, snapshot: &[Transaction]) -> BudgetStatus {
        let period_key = SummaryService::month_key(&self.clock.now());
        let spent: Amount = snapshot
            .iter()
            .filter(|txn| txn.is_expense())
            .filter(|txn| SummaryService::month_key(&txn.timestamp()) == period_key)
            .map(|txn| txn.amount().abs())
            .sum();
        self.state.period_key = period_key;
        self.state.spent = spent;
        let status = self.current_state();
        tracing::debug!(
            period = %status.period_key,
            spent = %status.spent,
            level = %status.level,
            "budget recomputed"
        );
        status
    }

    pub fn current_state(&self) -> BudgetStatus {
        let BudgetState {
            monthly_limit: limit,
            period_key,
            spent,
        } = &self.state;
        let level = AlertLevel::evaluate(*limit, *spent);
        let percent = if level == AlertLevel::Unset {
            Decimal::ZERO
        } else {
            spent
                .as_decimal()
                .checked_div(limit.as_decimal())
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map(|percent| percent.round_dp(2))
                .unwrap_or(Decimal::MAX)
        };
        let remaining = if spent < limit {
            *limit - *spent
        } else {
            Amount::ZERO
        };
        BudgetStatus {
            limit: *limit,
            spent: *spent,
            remaining,
            percent,
            level,
            period_key: period_key.clone(),
        }
    }
}

impl fmt::Debug for BudgetTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BudgetTracker")
            .field("state", &self.state)
            .finish()
    }
}
