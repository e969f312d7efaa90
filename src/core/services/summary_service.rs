//! Statistics and month-bucketed breakdowns computed from ledger snapshots.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{currency::Amount, ledger::Transaction};

/// Income and expense sums for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    pub month: String,
    pub income: Amount,
    pub expense: Amount,
}

/// Every statistic the analytics view renders, computed in one pass over a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LedgerSummary {
    pub total_income: Amount,
    pub total_expense: Amount,
    pub net_savings: Amount,
    pub transaction_count: usize,
    pub largest_expense: Amount,
    pub average_monthly_expense: Amount,
    pub expense_by_category: BTreeMap<String, Amount>,
    pub monthly_series: Vec<MonthlyTotals>,
}

/// Stateless aggregation helpers over [`Transaction`] snapshots.
pub struct SummaryService;

impl SummaryService {
    /// `YYYY-MM` bucket for a timestamp; the only time granularity used.
    pub fn month_key(timestamp: &NaiveDateTime) -> String {
        timestamp.format("%Y-%m").to_string()
    }

    pub fn total_income(snapshot: &[Transaction]) -> Amount {
        snapshot
            .iter()
            .filter(|txn| txn.is_income())
            .map(Transaction::amount)
            .sum()
    }

    /// Absolute value of all expenses.
    pub fn total_expense(snapshot: &[Transaction]) -> Amount {
        snapshot
            .iter()
            .filter(|txn| txn.is_expense())
            .map(|txn| txn.amount().abs())
            .sum()
    }

    pub fn net_savings(snapshot: &[Transaction]) -> Amount {
        Self::total_income(snapshot) - Self::total_expense(snapshot)
    }

    pub fn transaction_count(snapshot: &[Transaction]) -> usize {
        snapshot.len()
    }

    pub fn largest_expense(snapshot: &[Transaction]) -> Amount {
        snapshot
            .iter()
            .filter(|txn| txn.is_expense())
            .map(|txn| txn.amount().abs())
            .max()
            .unwrap_or(Amount::ZERO)
    }

    /// Categories without any expense are omitted.
    pub fn expense_by_category(snapshot: &[Transaction]) -> BTreeMap<String, Amount> {
        let mut totals: BTreeMap<String, Amount> = BTreeMap::new();
        for txn in snapshot.iter().filter(|txn| txn.is_expense()) {
            *totals.entry(txn.category().to_string()).or_default() += txn.amount().abs();
        }
        totals
    }

    /// Total expense divided by the number of months that contain at least one expense.
    pub fn average_monthly_expense(snapshot: &[Transaction]) -> Amount {
        let months: BTreeSet<String> = snapshot
            .iter()
            .filter(|txn| txn.is_expense())
            .map(|txn| Self::month_key(&txn.timestamp()))
            .collect();
        if months.is_empty() {
            return Amount::ZERO;
        }
        let total = Self::total_expense(snapshot).as_decimal();
        Amount::rounded(total / Decimal::from(months.len()))
    }

    /// The last `months` distinct months with activity, oldest first.
    pub fn monthly_series(snapshot: &[Transaction], months: usize) -> Vec<MonthlyTotals> {
        let mut buckets: BTreeMap<String, (Amount, Amount)> = BTreeMap::new();
        for txn in snapshot {
            let entry = buckets
                .entry(Self::month_key(&txn.timestamp()))
                .or_default();
            if txn.is_expense() {
                entry.1 += txn.amount().abs();
            } else {
                entry.0 += txn.amount();
            }
        }
        let skip = buckets.len().saturating_sub(months);
        buckets
            .into_iter()
            .skip(skip)
            .map(|(month, (income, expense))| MonthlyTotals {
                month,
                income,
                expense,
            })
            .collect()
    }

    pub fn summarize(snapshot: &[Transaction], history_months: usize) -> LedgerSummary {
        let total_income = Self::total_income(snapshot);
        let total_expense = Self::total_expense(snapshot);
        let summary = LedgerSummary {
            total_income,
            total_expense,
            net_savings: total_income - total_expense,
            transaction_count: Self::transaction_count(snapshot),
            largest_expense: Self::largest_expense(snapshot),
            average_monthly_expense: Self::average_monthly_expense(snapshot),
            expense_by_category: Self::expense_by_category(snapshot),
            monthly_series: Self::monthly_series(snapshot, history_months),
        };
        tracing::debug!(
            transactions = summary.transaction_count,
            net = %summary.net_savings,
            "summary recomputed"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::{
        core::time::FixedClock,
        ledger::{CategoryCatalog, Ledger, SeedEntry},
    };

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn ledger_with(entries: &[(i64, &str, NaiveDateTime)]) -> Ledger {
        let clock = Arc::new(FixedClock::new(at(2025, 10, 20)));
        let mut ledger = Ledger::with_clock(CategoryCatalog::default(), clock);
        ledger
            .seed(
                entries
                    .iter()
                    .map(|(cents, category, ts)| {
                        SeedEntry::new(Amount::from_cents(*cents), *category, "", *ts)
                    }),
            )
            .unwrap();
        ledger
    }

    #[test]
    fn empty_snapshot_yields_zeroes() {
        let summary = SummaryService::summarize(&[], 6);
        assert_eq!(summary, LedgerSummary::default());
    }

    #[test]
    fn average_only_counts_months_with_expenses() {
        let ledger = ledger_with(&[
            (250_000, "Salary", at(2025, 8, 1)),
            (-10_000, "Food", at(2025, 9, 3)),
            (-20_001, "Food", at(2025, 10, 3)),
        ]);
        // 300.01 / 2 = 150.005 rounds half-even to 150.00
        assert_eq!(
            SummaryService::average_monthly_expense(ledger.snapshot()),
            Amount::from_cents(15_000)
        );
        assert_eq!(
            SummaryService::largest_expense(ledger.snapshot()),
            Amount::from_cents(20_001)
        );
    }

    #[test]
    fn monthly_series_keeps_latest_months_in_calendar_order() {
        let ledger = ledger_with(&[
            (-100, "Food", at(2025, 3, 1)),
            (200, "Gift", at(2024, 12, 31)),
            (-300, "Bills", at(2025, 1, 15)),
            (400, "Salary", at(2025, 3, 2)),
        ]);
        let series = SummaryService::monthly_series(ledger.snapshot(), 2);
        assert_eq!(
            series,
            vec![
                MonthlyTotals {
                    month: "2025-01".into(),
                    income: Amount::ZERO,
                    expense: Amount::from_cents(300),
                },
                MonthlyTotals {
                    month: "2025-03".into(),
                    income: Amount::from_cents(400),
                    expense: Amount::from_cents(100),
                },
            ]
        );
        assert_eq!(SummaryService::monthly_series(ledger.snapshot(), 10).len(), 3);
        assert!(SummaryService::monthly_series(ledger.snapshot(), 0).is_empty());
    }

    #[test]
    fn category_breakdown_omits_income_only_categories() {
        let ledger = ledger_with(&[
            (500, "Other", at(2025, 1, 1)),
            (-150, "Food", at(2025, 1, 2)),
            (-50, "Food", at(2025, 2, 2)),
        ]);
        let breakdown = SummaryService::expense_by_category(ledger.snapshot());
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown["Food"], Amount::from_cents(200));
    }
}
