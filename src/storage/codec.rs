//! Wire codec for the persisted transaction list.
//!
//! Decoding is deliberately lenient about value types: ledgers written by
//! earlier app versions carry amounts as strings and loosely formatted
//! timestamps. Those fields coerce instead of failing the whole load.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{Transaction, TransactionKind};

use super::Result;

/// Raw persisted form of one transaction, before coercion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTransaction {
    id: String,
    kind: TransactionKind,
    #[serde(default)]
    amount: Value,
    category: String,
    description: String,
    #[serde(default)]
    occurred_at: Value,
}

impl StoredTransaction {
    fn into_transaction(self) -> Transaction {
        Transaction {
            amount: coerce_amount(&self.amount),
            occurred_at: coerce_timestamp(&self.occurred_at),
            id: self.id,
            kind: self.kind,
            category: self.category,
            description: self.description,
        }
    }
}

/// Decodes a stored value into a transaction list.
///
/// Returns `Ok(None)` when the value is valid JSON but not an array, and
/// an error when it is not valid JSON or an element fails the typed
/// decode. The caller maps both outcomes onto the seed ledger.
pub fn decode_transactions(raw: &str) -> Result<Option<Vec<Transaction>>> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_array() {
        return Ok(None);
    }
    let stored: Vec<StoredTransaction> = serde_json::from_value(value)?;
    Ok(Some(
        stored
            .into_iter()
            .map(StoredTransaction::into_transaction)
            .collect(),
    ))
}

/// Serializes the transaction list in the persisted wire format.
pub fn encode_transactions(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

fn coerce_amount(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn coerce_timestamp(value: &Value) -> DateTime<Utc> {
    let parsed = match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(number) => number.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        warn!("unreadable transaction timestamp, falling back to epoch");
        DateTime::UNIX_EPOCH
    })
}
