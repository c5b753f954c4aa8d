//! Transaction writes and the duplicate/cap checks backing them.
//!
//! The validation sequence runs in a fixed order so the first failing rule
//! is the one reported: required fields and amount bound (pure, see
//! [`rules`]), then the per-day cap (create only), then the per-day
//! duplicate category (income) or duplicate supplier (expense) check,
//! self-excluding on edit. Only then does a row reach storage.
//!
//! [`rules`]: crate::rules

use chrono::Utc;
use sea_orm::{ActiveValue, PaginatorTrait, QueryFilter, prelude::*};

use crate::{
    Ledger, LedgerError, ResultLedger, TransactionDraft, TransactionKind, rules, transactions,
};

impl Ledger {
    /// Validate a draft and insert it, stamping `created_at` with the
    /// current time. Returns the database-assigned id.
    pub async fn create_transaction(&self, draft: &TransactionDraft) -> ResultLedger<i32> {
        rules::validate_draft(draft)?;

        let count = self.daily_transaction_count(&draft.date, draft.kind).await?;
        if count >= rules::DAILY_ENTRY_CAP {
            return Err(LedgerError::DailyCapReached {
                kind: draft.kind.as_str().to_string(),
                cap: rules::DAILY_ENTRY_CAP,
            });
        }

        let supplier_id = self.check_duplicates(draft, None).await?;

        let model = transactions::new_row(draft, supplier_id, Utc::now())
            .insert(&self.database)
            .await?;
        tracing::debug!(
            id = model.id,
            kind = draft.kind.as_str(),
            date = %draft.date,
            "transaction created"
        );
        Ok(model.id)
    }

    /// Validate a draft and overwrite all mutable fields of the row `id`.
    ///
    /// `created_at` is left untouched and the per-day cap is not
    /// re-checked on edit; the duplicate checks run with the row excluding
    /// itself. Updating a non-existent id is a silent no-op.
    pub async fn update_transaction(&self, id: i32, draft: &TransactionDraft) -> ResultLedger<()> {
        rules::validate_draft(draft)?;

        let supplier_id = self.check_duplicates(draft, Some(id)).await?;

        let mut row = transactions::new_row(draft, supplier_id, Utc::now());
        row.created_at = ActiveValue::NotSet;

        transactions::Entity::update_many()
            .set(row)
            .filter(transactions::Column::Id.eq(id))
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Remove the row `id`; silent no-op if it does not exist.
    pub async fn delete_transaction(&self, id: i32) -> ResultLedger<()> {
        transactions::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Count of existing entries for one `(date, kind)` pair.
    pub async fn daily_transaction_count(
        &self,
        date: &str,
        kind: TransactionKind,
    ) -> ResultLedger<u64> {
        let count = transactions::Entity::find()
            .filter(transactions::Column::Date.eq(date))
            .filter(transactions::Column::Kind.eq(kind.as_str()))
            .count(&self.database)
            .await?;
        Ok(count)
    }

    /// True if an income entry already exists for `(date, category)`,
    /// optionally excluding one id so an edit never collides with itself.
    pub async fn income_category_exists(
        &self,
        date: &str,
        category: &str,
        exclude_id: Option<i32>,
    ) -> ResultLedger<bool> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::Date.eq(date))
            .filter(transactions::Column::Kind.eq(TransactionKind::Income.as_str()))
            .filter(transactions::Column::Category.eq(category));
        if let Some(id) = exclude_id {
            query = query.filter(transactions::Column::Id.ne(id));
        }
        Ok(query.one(&self.database).await?.is_some())
    }

    /// True if an expense entry already exists for `(date, supplier_id)`,
    /// optionally excluding one id.
    pub async fn expense_supplier_exists(
        &self,
        date: &str,
        supplier_id: i32,
        exclude_id: Option<i32>,
    ) -> ResultLedger<bool> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::Date.eq(date))
            .filter(transactions::Column::Kind.eq(TransactionKind::Expense.as_str()))
            .filter(transactions::Column::SupplierId.eq(supplier_id));
        if let Some(id) = exclude_id {
            query = query.filter(transactions::Column::Id.ne(id));
        }
        Ok(query.one(&self.database).await?.is_some())
    }

    /// Run the per-day duplicate rule for the draft and return the resolved
    /// supplier id (expense) or `None` (income).
    ///
    /// Supplier resolution and the transaction insert remain two separate
    /// round trips; a crash in between leaves an orphan supplier, which is
    /// an accepted inconsistency.
    async fn check_duplicates(
        &self,
        draft: &TransactionDraft,
        exclude_id: Option<i32>,
    ) -> ResultLedger<Option<i32>> {
        match draft.kind {
            TransactionKind::Income => {
                if self
                    .income_category_exists(&draft.date, &draft.category, exclude_id)
                    .await?
                {
                    return Err(LedgerError::DuplicateCategory(draft.category.clone()));
                }
                Ok(None)
            }
            TransactionKind::Expense => {
                // validate_draft guarantees the supplier name is present.
                let name = draft
                    .supplier
                    .as_deref()
                    .ok_or_else(|| LedgerError::MissingField("supplier".to_string()))?;
                let supplier_id = self.get_or_create_supplier(name).await?;
                if self
                    .expense_supplier_exists(&draft.date, supplier_id, exclude_id)
                    .await?
                {
                    return Err(LedgerError::DuplicateSupplier(name.to_string()));
                }
                Ok(Some(supplier_id))
            }
        }
    }
}
