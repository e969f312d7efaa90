use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

pub const DEFAULT_INCOME_CATEGORIES: [&str; 5] = ["Salary", "Bonus", "Investment", "Gift", "Other"];

pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 10] = [
    "Food",
    "Bills",
    "Rent",
    "Transportation",
    "Healthcare",
    "Shopping",
    "Entertainment",
    "Education",
    "Travel",
    "Other",
];

/// The fixed income and expense category lists a ledger accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "CatalogLists")]
pub struct CategoryCatalog {
    income: Vec<String>,
    expense: Vec<String>,
}

#[derive(Deserialize)]
struct CatalogLists {
    income: Vec<String>,
    expense: Vec<String>,
}

impl TryFrom<CatalogLists> for CategoryCatalog {
    type Error = LedgerError;

    fn try_from(lists: CatalogLists) -> Result<Self> {
        Self::new(lists.income, lists.expense)
    }
}

impl CategoryCatalog {
    pub fn new<I, E>(income: I, expense: E) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let income: Vec<String> = income.into_iter().map(Into::into).collect();
        let expense: Vec<String> = expense.into_iter().map(Into::into).collect();
        if income.is_empty() || expense.is_empty() {
            return Err(LedgerError::Validation(
                "income and expense category lists must not be empty".into(),
            ));
        }
        if income.iter().chain(expense.iter()).any(|name| name.trim().is_empty()) {
            return Err(LedgerError::Validation(
                "category names must not be blank".into(),
            ));
        }
        Ok(Self { income, expense })
    }

    pub fn income(&self) -> &[String] {
        &self.income
    }

    pub fn expense(&self) -> &[String] {
        &self.expense
    }

    /// Sorted union of both lists without duplicates.
    pub fn all(&self) -> Vec<String> {
        self.income
            .iter()
            .chain(self.expense.iter())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.income.iter().chain(self.expense.iter()).any(|c| c == name)
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self {
            income: DEFAULT_INCOME_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            expense: DEFAULT_EXPENSE_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}
