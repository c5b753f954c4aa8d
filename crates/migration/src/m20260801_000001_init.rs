//! Initial schema migration - creates the ledger tables from scratch.
//!
//! Two tables only:
//!
//! - `suppliers`: parties expenses are paid to, created on first reference
//! - `transactions`: income/expense entries with a nullable FK to suppliers
//!
//! All DDL is `if_not_exists`, so running the initializer on every startup
//! leaves existing definitions and data unchanged.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Suppliers {
    Table,
    Id,
    Name,
    Phone,
    CreatedAt,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    Kind,
    Amount,
    Category,
    Note,
    Date,
    PaymentType,
    SupplierId,
    ImagePath,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Suppliers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Suppliers::Name).string().not_null())
                    .col(ColumnDef::new(Suppliers::Phone).string())
                    .col(ColumnDef::new(Suppliers::CreatedAt).timestamp())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Kind)
                            .string()
                            .not_null()
                            .check(Expr::col(Transactions::Kind).is_in(["income", "expense"])),
                    )
                    .col(ColumnDef::new(Transactions::Amount).double().not_null())
                    .col(ColumnDef::new(Transactions::Category).string())
                    .col(ColumnDef::new(Transactions::Note).string())
                    // Business day as 'YYYY-MM-DD'; lexicographic order is
                    // chronological order by construction.
                    .col(ColumnDef::new(Transactions::Date).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::PaymentType)
                            .string()
                            .check(Expr::col(Transactions::PaymentType).is_in([
                                "cash",
                                "online",
                                "due",
                                "due_paid",
                            ])),
                    )
                    .col(ColumnDef::new(Transactions::SupplierId).integer())
                    // JSON array of local image locations, or NULL.
                    .col(ColumnDef::new(Transactions::ImagePath).string())
                    .col(ColumnDef::new(Transactions::CreatedAt).timestamp())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-supplier_id")
                            .from(Transactions::Table, Transactions::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-transactions-date")
                    .table(Transactions::Table)
                    .col(Transactions::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-transactions-supplier_id")
                    .table(Transactions::Table)
                    .col(Transactions::SupplierId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Suppliers::Table).to_owned())
            .await?;
        Ok(())
    }
}
