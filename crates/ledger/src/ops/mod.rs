//! Ledger operations, grouped by concern.
//!
//! Each submodule extends [`Ledger`] with one slice of the API: supplier
//! create/lookup, transaction writes with their validation sequence, and
//! the read-side queries and summaries.
//!
//! [`Ledger`]: crate::Ledger

mod queries;
mod suppliers;
mod write;
