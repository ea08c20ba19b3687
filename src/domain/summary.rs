use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionKind};

/// Aggregate totals derived from the current ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

impl LedgerSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut total_income = 0.0;
        let mut total_expense = 0.0;
        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => total_income += txn.amount,
                TransactionKind::Expense => total_expense += txn.amount,
            }
        }
        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}

/// Summed expense amount for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Groups expense transactions by exact category label and sums their
/// amounts, sorted descending by total. Equal totals keep the order in
/// which each category first appears in the ledger.
pub fn expense_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        match totals.iter_mut().find(|entry| entry.category == txn.category) {
            Some(entry) => entry.total += txn.amount,
            None => totals.push(CategoryTotal {
                category: txn.category.clone(),
                total: txn.amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    totals
}
