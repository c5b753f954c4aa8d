use chrono::Utc;
use sea_orm::{QueryFilter, prelude::*};

use crate::{Ledger, ResultLedger, Supplier, suppliers};

impl Ledger {
    /// Insert a new supplier and return its database-assigned id.
    ///
    /// Storage enforces no name uniqueness; exact-name de-duplication is
    /// the job of [`get_or_create_supplier`].
    ///
    /// [`get_or_create_supplier`]: Ledger::get_or_create_supplier
    pub async fn create_supplier(&self, name: &str, phone: Option<&str>) -> ResultLedger<i32> {
        let model = suppliers::new_row(name, phone, Utc::now())
            .insert(&self.database)
            .await?;
        Ok(model.id)
    }

    /// Return all suppliers in natural storage order.
    pub async fn list_suppliers(&self) -> ResultLedger<Vec<Supplier>> {
        let models = suppliers::Entity::find().all(&self.database).await?;
        Ok(models.into_iter().map(Supplier::from).collect())
    }

    /// Return the id of the first supplier whose name matches exactly,
    /// creating one if none exists.
    ///
    /// Read-then-write with no atomic guarantee: two concurrent calls with
    /// the same new name can both insert. Accepted for a single-user
    /// client; duplicate supplier rows are harmless on their own.
    pub async fn get_or_create_supplier(&self, name: &str) -> ResultLedger<i32> {
        let existing = suppliers::Entity::find()
            .filter(suppliers::Column::Name.eq(name))
            .one(&self.database)
            .await?;

        if let Some(model) = existing {
            return Ok(model.id);
        }

        tracing::debug!(supplier = name, "creating supplier on first reference");
        self.create_supplier(name, None).await
    }
}
