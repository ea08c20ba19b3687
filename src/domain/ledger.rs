use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionKind};

/// The ordered collection of all transactions, newest first.
///
/// Serializes transparently as a bare transaction array, matching the
/// persisted wire format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-ordered transaction list, accepted verbatim.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// The fixed starting dataset used when no valid persisted state exists.
    pub fn seed() -> Self {
        let now = Utc::now();
        let entry = |id: &str, kind, amount, category: &str, description: &str| Transaction {
            id: id.to_string(),
            kind,
            amount,
            category: category.to_string(),
            description: description.to_string(),
            occurred_at: now,
        };
        Self {
            transactions: vec![
                entry("1", TransactionKind::Income, 5000.0, "Salary", "Monthly Salary"),
                entry("2", TransactionKind::Expense, 120.0, "Food", "Groceries"),
                entry("3", TransactionKind::Expense, 50.0, "Transport", "Uber"),
                entry("4", TransactionKind::Expense, 800.0, "Rent", "Monthly Rent"),
            ],
        }
    }

    /// Inserts at the head so the newest transaction comes first.
    pub fn add_transaction(&mut self, transaction: Transaction) -> String {
        let id = transaction.id.clone();
        self.transactions.insert(0, transaction);
        id
    }

    /// Removes and returns the transaction with the given id, if present.
    pub fn remove_transaction(&mut self, id: &str) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
