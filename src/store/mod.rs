//! Reactive ledger store: a single-writer state container that owns the
//! transaction list, keeps derived aggregates consistent with it, pushes
//! change notifications to subscribers, and persists on every mutation.
//!
//! Persistence is best-effort: the in-memory ledger stays authoritative
//! for the running session and storage failures never surface to the
//! caller of a mutation.

use tracing::{debug, warn};

use crate::domain::{
    expense_breakdown, CategoryTotal, Ledger, LedgerSummary, Transaction, TransactionKind,
};
use crate::storage::{codec, KeyValueStorage, TRANSACTIONS_KEY};

/// Handle returned by [`LedgerStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Borrowed view of the store state handed to subscribers.
pub struct LedgerView<'a> {
    pub ledger: &'a Ledger,
    pub summary: &'a LedgerSummary,
    pub category_breakdown: &'a [CategoryTotal],
}

type Subscriber = Box<dyn FnMut(LedgerView<'_>) + Send>;

pub struct LedgerStore {
    ledger: Ledger,
    summary: LedgerSummary,
    breakdown: Vec<CategoryTotal>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    storage: Box<dyn KeyValueStorage>,
}

impl LedgerStore {
    /// Opens the store, loading persisted transactions through the
    /// recovery policy. Every failure path degrades to the seed ledger,
    /// so construction itself cannot fail.
    pub fn open(storage: Box<dyn KeyValueStorage>) -> Self {
        let ledger = load_initial(storage.as_ref());
        let summary = LedgerSummary::from_transactions(ledger.transactions());
        let breakdown = expense_breakdown(ledger.transactions());
        Self {
            ledger,
            summary,
            breakdown,
            subscribers: Vec::new(),
            next_subscription: 0,
            storage,
        }
    }

    /// Records a new transaction at the head of the ledger and returns
    /// its id.
    ///
    /// The store accepts caller-validated input: positivity of `amount`
    /// and non-empty labels are the form layer's responsibility. The
    /// only normalization applied here is clamping non-finite amounts
    /// to zero.
    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let transaction = Transaction::new(kind, amount, category, description);
        let id = self.ledger.add_transaction(transaction);
        debug!("added transaction {id}");
        self.apply_change();
        id
    }

    /// Removes the transaction with the given id. Unknown ids are a
    /// complete no-op: no recomputation, no write, no notification.
    pub fn delete_transaction(&mut self, id: &str) {
        if self.ledger.remove_transaction(id).is_none() {
            return;
        }
        debug!("deleted transaction {id}");
        self.apply_change();
    }

    /// Registers a callback invoked synchronously after every effective
    /// mutation, with the already-updated state.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(LedgerView<'_>) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(existing, _)| *existing != id);
    }

    /// Current ledger, newest transaction first.
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.ledger.transaction(id)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn summary(&self) -> &LedgerSummary {
        &self.summary
    }

    pub fn total_income(&self) -> f64 {
        self.summary.total_income
    }

    pub fn total_expense(&self) -> f64 {
        self.summary.total_expense
    }

    pub fn balance(&self) -> f64 {
        self.summary.balance
    }

    /// Expense totals grouped by category, highest first.
    pub fn category_breakdown(&self) -> &[CategoryTotal] {
        &self.breakdown
    }

    pub fn transaction_count(&self) -> usize {
        self.ledger.transaction_count()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    fn apply_change(&mut self) {
        self.summary = LedgerSummary::from_transactions(self.ledger.transactions());
        self.breakdown = expense_breakdown(self.ledger.transactions());
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        let payload = match codec::encode_transactions(self.ledger.transactions()) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("could not serialize transactions: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.write(TRANSACTIONS_KEY, &payload) {
            warn!("could not persist transactions: {err}");
        }
    }

    fn notify(&mut self) {
        // Subscribers move out for the duration of the walk so callbacks
        // can borrow the rest of the store state.
        let mut subscribers = std::mem::take(&mut self.subscribers);
        for (_, callback) in subscribers.iter_mut() {
            callback(LedgerView {
                ledger: &self.ledger,
                summary: &self.summary,
                category_breakdown: &self.breakdown,
            });
        }
        self.subscribers = subscribers;
    }
}

fn load_initial(storage: &dyn KeyValueStorage) -> Ledger {
    let raw = match storage.read(TRANSACTIONS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ledger::seed(),
        Err(err) => {
            warn!("transaction storage unavailable, using seed data: {err}");
            return Ledger::seed();
        }
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "undefined" || trimmed == "null" {
        return Ledger::seed();
    }
    match codec::decode_transactions(&raw) {
        Ok(Some(transactions)) => Ledger::from_transactions(transactions),
        Ok(None) => Ledger::seed(),
        Err(err) => {
            warn!("failed to parse persisted transactions, reverting to seed data: {err}");
            if let Err(remove_err) = storage.remove(TRANSACTIONS_KEY) {
                warn!("could not clear corrupted transaction data: {remove_err}");
            }
            Ledger::seed()
        }
    }
}
