pub mod ledger;
pub mod summary;
pub mod transaction;

pub use ledger::Ledger;
pub use summary::{expense_breakdown, CategoryTotal, LedgerSummary};
pub use transaction::{Transaction, TransactionKind};
