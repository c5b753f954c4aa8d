//! Pure validation rules evaluated before a write.
//!
//! These functions do no I/O. The ledger runs them first, then the two
//! duplicate checks that need the database, so the first failing rule
//! aborts the save with a distinct reason and nothing is written.

use chrono::NaiveDate;

use crate::{LedgerError, ResultLedger, TransactionDraft, TransactionKind};

/// Upper bound for a single entry amount.
pub const MAX_AMOUNT: f64 = 20_000.0;

/// At most this many entries of one kind may share a business day. Checked
/// on create only; editing an existing entry never re-triggers it.
pub const DAILY_ENTRY_CAP: u64 = 12;

/// At most this many bill images may be attached to one entry.
pub const MAX_IMAGE_PATHS: usize = 7;

/// Validate the draft fields that need no database access, in the order
/// the save flow reports them: required fields, then the amount bound.
pub fn validate_draft(draft: &TransactionDraft) -> ResultLedger<()> {
    if draft.category.trim().is_empty() {
        return Err(LedgerError::MissingField("category".to_string()));
    }
    if draft.kind == TransactionKind::Expense
        && draft.supplier.as_deref().is_none_or(|s| s.trim().is_empty())
    {
        return Err(LedgerError::MissingField("supplier".to_string()));
    }
    validate_date(&draft.date)?;
    if draft.image_paths.len() > MAX_IMAGE_PATHS {
        return Err(LedgerError::TooManyImages(MAX_IMAGE_PATHS));
    }
    validate_amount(draft.amount)
}

/// Amount must be a finite number in `(0, MAX_AMOUNT]`.
pub fn validate_amount(amount: f64) -> ResultLedger<()> {
    if !amount.is_finite() || amount <= 0.0 || amount > MAX_AMOUNT {
        return Err(LedgerError::InvalidAmount(format!(
            "amount must be > 0 and <= {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

/// Dates are stored as `YYYY-MM-DD` text and compared lexicographically, so
/// anything that does not round-trip through that exact format is rejected.
pub fn validate_date(date: &str) -> ResultLedger<()> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(date.to_string()))?;
    if parsed.format("%Y-%m-%d").to_string() != date {
        return Err(LedgerError::InvalidDate(date.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PaymentType;

    fn draft(kind: TransactionKind, amount: f64) -> TransactionDraft {
        TransactionDraft {
            kind,
            amount,
            category: "Sales".to_string(),
            note: None,
            date: "2026-02-10".to_string(),
            payment_type: PaymentType::Cash,
            supplier: (kind == TransactionKind::Expense).then(|| "Sharma Steel".to_string()),
            image_paths: Vec::new(),
        }
    }

    #[test]
    fn amount_bounds() {
        assert!(validate_amount(0.01).is_ok());
        assert!(validate_amount(20_000.0).is_ok());

        for bad in [0.0, -5.0, 20_000.01, f64::NAN, f64::INFINITY] {
            assert!(validate_amount(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn category_is_required() {
        let mut d = draft(TransactionKind::Income, 100.0);
        d.category = "  ".to_string();
        assert_eq!(
            validate_draft(&d),
            Err(LedgerError::MissingField("category".to_string()))
        );
    }

    #[test]
    fn supplier_required_for_expense_only() {
        let mut d = draft(TransactionKind::Expense, 100.0);
        d.supplier = None;
        assert_eq!(
            validate_draft(&d),
            Err(LedgerError::MissingField("supplier".to_string()))
        );

        let mut d = draft(TransactionKind::Income, 100.0);
        d.supplier = None;
        assert!(validate_draft(&d).is_ok());
    }

    #[test]
    fn date_must_be_iso_day() {
        assert!(validate_date("2026-02-10").is_ok());
        for bad in ["2026-2-10", "10-02-2026", "2026-02-30", "today", ""] {
            assert!(validate_date(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn image_list_is_bounded() {
        let mut d = draft(TransactionKind::Income, 100.0);
        d.image_paths = (0..8).map(|i| format!("bills/bill_{i}.jpg")).collect();
        assert_eq!(
            validate_draft(&d),
            Err(LedgerError::TooManyImages(MAX_IMAGE_PATHS))
        );

        d.image_paths.truncate(7);
        assert!(validate_draft(&d).is_ok());
    }
}
