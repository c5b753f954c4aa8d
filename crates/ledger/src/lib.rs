//! Local bookkeeping ledger over an embedded SQLite database.
//!
//! The ledger stores income/expense transactions and suppliers, and
//! enforces the business invariants (amount bounds, per-day entry cap,
//! per-day duplicate category/supplier) before any write. It owns all
//! persistence; callers never touch storage directly.

use sea_orm::DatabaseConnection;

pub use categories::{EXPENSE_CATEGORIES, INCOME_CATEGORIES, categories_for, is_known_category};
pub use error::LedgerError;
pub use rules::{DAILY_ENTRY_CAP, MAX_AMOUNT, MAX_IMAGE_PATHS};
pub use suppliers::Supplier;
pub use transactions::{
    KindTotal, PaymentType, Transaction, TransactionDraft, TransactionKind,
    TransactionWithSupplier,
};

mod categories;
mod error;
mod ops;
pub mod rules;
pub mod suppliers;
pub mod transactions;

type ResultLedger<T> = Result<T, LedgerError>;

/// The ledger: a long-lived handle over one shared database connection.
///
/// Construct it once at process start via [`Ledger::builder`] and pass it
/// wherever persistence is needed. All operations are async and complete
/// in issue order when awaited sequentially by one caller.
#[derive(Debug)]
pub struct Ledger {
    database: DatabaseConnection,
}

impl Ledger {
    /// Return a builder for `Ledger`. Help to build the struct.
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }
}

/// The builder for `Ledger`
#[derive(Default)]
pub struct LedgerBuilder {
    database: DatabaseConnection,
}

impl LedgerBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> LedgerBuilder {
        self.database = db;
        self
    }

    /// Construct `Ledger`
    pub fn build(self) -> Ledger {
        Ledger {
            database: self.database,
        }
    }
}
