use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::currency::Amount;

/// Minute-resolution timestamp layout used for display and export.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single signed money movement. Immutable once appended to a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: u64,
    amount: Amount,
    category: String,
    description: String,
    timestamp: NaiveDateTime,
}

impl Transaction {
    pub(crate) fn new(
        id: u64,
        amount: Amount,
        category: String,
        description: String,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            amount,
            category,
            description,
            timestamp,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn direction(&self) -> Direction {
        Direction::of(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn timestamp_label(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Which way money moves; decides the stored sign of an amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    /// Direction implied by the sign of `amount`.
    pub fn of(amount: Amount) -> Self {
        if amount.is_negative() {
            Direction::Expense
        } else {
            Direction::Income
        }
    }

    /// Forces the sign of `amount`: income positive, expense negative.
    pub fn apply(self, amount: Amount) -> Amount {
        match self {
            Direction::Income => amount.abs(),
            Direction::Expense => -amount.abs(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Income => "Income",
            Direction::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Pre-existing activity loaded into a ledger; direction follows the sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedEntry {
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub timestamp: NaiveDateTime,
}

impl SeedEntry {
    pub fn new(
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_forces_sign() {
        let amount = Amount::from_cents(4_200);
        assert_eq!(Direction::Expense.apply(amount), Amount::from_cents(-4_200));
        assert_eq!(Direction::Expense.apply(-amount), Amount::from_cents(-4_200));
        assert_eq!(Direction::Income.apply(-amount), amount);
        assert_eq!(Direction::of(-amount), Direction::Expense);
        assert_eq!(Direction::Income.to_string(), "Income");
    }
}
