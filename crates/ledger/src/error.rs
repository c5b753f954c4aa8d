//! The module contains the errors the ledger can throw.
//!
//! Validation errors are detected before any write reaches storage, so a
//! failed save never leaves a partial row behind. [`Database`] wraps the
//! storage layer and is the only variant callers cannot fix by correcting
//! their input.
//!
//! [`Database`]: LedgerError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Maximum {cap} {kind} entries allowed per day")]
    DailyCapReached { kind: String, cap: u64 },
    #[error("Income category \"{0}\" already exists for this date")]
    DuplicateCategory(String),
    #[error("Expense for supplier \"{0}\" already exists for this date")]
    DuplicateSupplier(String),
    #[error("Maximum {0} images allowed")]
    TooManyImages(usize),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl LedgerError {
    /// True when the error is something the user can fix by correcting the
    /// entry, as opposed to a storage failure.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Database(_))
    }
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingField(a), Self::MissingField(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (
                Self::DailyCapReached { kind: a, cap: x },
                Self::DailyCapReached { kind: b, cap: y },
            ) => a == b && x == y,
            (Self::DuplicateCategory(a), Self::DuplicateCategory(b)) => a == b,
            (Self::DuplicateSupplier(a), Self::DuplicateSupplier(b)) => a == b,
            (Self::TooManyImages(a), Self::TooManyImages(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
