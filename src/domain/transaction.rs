use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Income or expense classification of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// One recorded income or expense event. Immutable once created.
///
/// Ids are strings rather than typed UUIDs: ledgers persisted by earlier
/// app versions carry plain numeric ids and are accepted verbatim on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a transaction with a fresh id, stamped at the current time.
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            amount,
            category: category.into(),
            description: description.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_distinct_ids() {
        let first = Transaction::new(TransactionKind::Income, 10.0, "Salary", "Pay");
        let second = Transaction::new(TransactionKind::Income, 10.0, "Salary", "Pay");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionKind::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
        let json = serde_json::to_string(&TransactionKind::Income).unwrap();
        assert_eq!(json, "\"income\"");
    }

    #[test]
    fn serialized_form_uses_camel_case_timestamp() {
        let txn = Transaction::new(TransactionKind::Expense, 12.5, "Food", "Lunch");
        let json = serde_json::to_value(&txn).unwrap();
        assert!(json.get("occurredAt").is_some());
        assert_eq!(json.get("kind").and_then(|v| v.as_str()), Some("expense"));
    }
}
