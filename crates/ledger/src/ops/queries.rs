//! Read-side queries: per-day and range listings plus the range summary.
//!
//! All range queries are inclusive on both ends and compare `date` as
//! `YYYY-MM-DD` text, where lexicographic and chronological ordering
//! coincide by construction.

use sea_orm::{FromQueryResult, QueryFilter, QueryOrder, Statement, prelude::*};

use crate::{
    KindTotal, Ledger, ResultLedger, TransactionWithSupplier, suppliers, transactions,
};

impl Ledger {
    /// All transactions of one business day, joined with the supplier
    /// name, ordered by `(kind, created_at ascending)`.
    pub async fn transactions_by_date(
        &self,
        date: &str,
    ) -> ResultLedger<Vec<TransactionWithSupplier>> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::Date.eq(date))
            .find_also_related(suppliers::Entity)
            .order_by_asc(transactions::Column::Kind)
            .order_by_asc(transactions::Column::CreatedAt)
            .all(&self.database)
            .await?;

        rows.into_iter()
            .map(|(tx, supplier)| TransactionWithSupplier::from_models(tx, supplier))
            .collect()
    }

    /// All transactions with `from <= date <= to`, joined with the
    /// supplier name, newest day first and newest entry first within a day.
    pub async fn transactions_by_date_range(
        &self,
        from: &str,
        to: &str,
    ) -> ResultLedger<Vec<TransactionWithSupplier>> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::Date.between(from, to))
            .find_also_related(suppliers::Entity)
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.database)
            .await?;

        rows.into_iter()
            .map(|(tx, supplier)| TransactionWithSupplier::from_models(tx, supplier))
            .collect()
    }

    /// Sum of `amount` grouped by kind over an inclusive date range.
    ///
    /// Kinds with no entries in the range are omitted; callers default the
    /// missing totals to zero.
    pub async fn summary_by_date_range(
        &self,
        from: &str,
        to: &str,
    ) -> ResultLedger<Vec<KindTotal>> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT kind, IFNULL(SUM(amount), 0) AS total \
             FROM transactions \
             WHERE date BETWEEN ? AND ? \
             GROUP BY kind",
            vec![from.into(), to.into()],
        );

        let totals = KindTotal::find_by_statement(stmt).all(&self.database).await?;
        Ok(totals)
    }
}
