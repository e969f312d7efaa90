use std::{fmt, sync::Arc};

use chrono::NaiveDateTime;

use super::{
    category::CategoryCatalog,
    transaction::{Direction, SeedEntry, Transaction},
};
use crate::{
    core::time::{truncate_to_minute, Clock, SystemClock},
    currency::Amount,
    errors::{LedgerError, Result},
};

/// Callback invoked with the full snapshot after every mutation.
pub type LedgerObserver = Box<dyn FnMut(&[Transaction])>;

/// Handle returned by [`Ledger::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Append-only, insertion-ordered store of transactions with a running balance.
pub struct Ledger {
    catalog: CategoryCatalog,
    transactions: Vec<Transaction>,
    balance: Amount,
    next_id: u64,
    clock: Arc<dyn Clock>,
    observers: Vec<(SubscriptionId, LedgerObserver)>,
    next_subscription: u64,
}

impl Ledger {
    pub fn new(catalog: CategoryCatalog) -> Self {
        Self::with_clock(catalog, Arc::new(SystemClock))
    }

    pub fn with_clock(catalog: CategoryCatalog, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            transactions: Vec::new(),
            balance: Amount::ZERO,
            next_id: 1,
            clock,
            observers: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Appends a transaction stamped with the current minute.
    pub fn append(
        &mut self,
        amount: Amount,
        category: &str,
        description: &str,
        direction: Direction,
    ) -> Result<Transaction> {
        let timestamp = self.clock.now_minute();
        self.append_at(amount, category, description, direction, timestamp)
    }

    /// Appends a transaction with an explicit timestamp.
    pub fn append_at(
        &mut self,
        amount: Amount,
        category: &str,
        description: &str,
        direction: Direction,
        timestamp: NaiveDateTime,
    ) -> Result<Transaction> {
        let amount = direction.apply(amount);
        self.validate(amount, category)?;
        let balance = Self::advance(self.balance, amount)?;
        let transaction = self.push(amount, category, description, timestamp);
        self.balance = balance;
        tracing::debug!(
            id = transaction.id(),
            amount = %transaction.amount(),
            category = transaction.category(),
            "transaction appended"
        );
        self.notify();
        Ok(transaction)
    }

    /// Loads pre-existing activity. Either every entry is appended or none is.
    pub fn seed<I>(&mut self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = SeedEntry>,
    {
        let entries: Vec<SeedEntry> = entries.into_iter().collect();
        if entries.is_empty() {
            return Ok(0);
        }
        let mut balance = self.balance;
        for entry in &entries {
            self.validate(entry.amount, &entry.category)?;
            balance = Self::advance(balance, entry.amount)?;
        }
        let count = entries.len();
        for entry in entries {
            self.push(
                entry.amount,
                &entry.category,
                &entry.description,
                entry.timestamp,
            );
        }
        self.balance = balance;
        tracing::debug!(count, "ledger seeded");
        self.notify();
        Ok(count)
    }

    /// Removes every transaction and restarts id assignment.
    pub fn clear(&mut self) {
        let removed = self.transactions.len();
        self.transactions.clear();
        self.balance = Amount::ZERO;
        self.next_id = 1;
        tracing::info!(removed, "ledger cleared");
        self.notify();
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Transactions in insertion (ascending id) order.
    pub fn snapshot(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions newest first, as the history view lists them.
    pub fn history(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev()
    }

    pub fn get(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Registers a handler run synchronously, in registration order, after each mutation.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&[Transaction]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        before != self.observers.len()
    }

    fn validate(&self, amount: Amount, category: &str) -> Result<()> {
        if amount.is_zero() {
            tracing::warn!(category, "rejected zero amount");
            return Err(LedgerError::Validation("amount must be non-zero".into()));
        }
        if !self.catalog.contains(category) {
            tracing::warn!(category, "rejected unknown category");
            return Err(LedgerError::Validation(format!(
                "unknown category `{}`",
                category
            )));
        }
        Ok(())
    }

    fn advance(balance: Amount, amount: Amount) -> Result<Amount> {
        balance.checked_add(amount).ok_or_else(|| {
            tracing::warn!(balance = %balance, amount = %amount, "rejected balance overflow");
            LedgerError::Validation("balance would leave the supported range".into())
        })
    }

    fn push(
        &mut self,
        amount: Amount,
        category: &str,
        description: &str,
        timestamp: NaiveDateTime,
    ) -> Transaction {
        let transaction = Transaction::new(
            self.next_id,
            amount,
            category.to_string(),
            description.trim().to_string(),
            truncate_to_minute(timestamp),
        );
        self.next_id += 1;
        self.transactions.push(transaction.clone());
        transaction
    }

    fn notify(&mut self) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.transactions);
        }
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("transactions", &self.transactions)
            .field("balance", &self.balance)
            .field("next_id", &self.next_id)
            .field("observers", &self.observers.len())
            .finish()
    }
}
