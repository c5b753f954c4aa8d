//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense entry belonging to a
//! business day (its `date`), independent of the wall-clock instant it was
//! recorded (`created_at`). Dates cross every boundary as `YYYY-MM-DD`
//! strings so lexicographic and chronological ordering coincide.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DbErr, FromQueryResult, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::LedgerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::KeyNotFound(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

/// How an entry was settled. `Due` marks an amount owed but not yet paid;
/// `DuePaid` marks its later settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    Online,
    Due,
    DuePaid,
}

impl PaymentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Online => "online",
            Self::Due => "due",
            Self::DuePaid => "due_paid",
        }
    }
}

impl TryFrom<&str> for PaymentType {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "cash" => Ok(Self::Cash),
            "online" => Ok(Self::Online),
            "due" => Ok(Self::Due),
            "due_paid" => Ok(Self::DuePaid),
            other => Err(LedgerError::KeyNotFound(format!(
                "invalid payment type: {other}"
            ))),
        }
    }
}

/// Caller-supplied fields for a create or update.
///
/// `supplier` carries the supplier *name*; the ledger resolves (or creates)
/// the supplier id while validating an expense. It is ignored for income.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    pub date: String,
    pub payment_type: PaymentType,
    pub supplier: Option<String>,
    pub image_paths: Vec<String>,
}

/// A stored transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i32,
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: Option<String>,
    pub note: Option<String>,
    pub date: String,
    pub payment_type: PaymentType,
    pub supplier_id: Option<i32>,
    pub image_paths: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A transaction joined with its supplier's name, as returned by the
/// per-day and range queries. Distinct from [`Transaction`] so callers
/// never fish the name out of an untyped row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionWithSupplier {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub supplier_name: Option<String>,
}

/// One row of a range summary: total amount for a kind. Kinds with no
/// transactions in the range are omitted; callers default them to zero.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct KindTotal {
    pub kind: String,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub kind: String,
    pub amount: f64,
    pub category: Option<String>,
    pub note: Option<String>,
    pub date: String,
    pub payment_type: String,
    pub supplier_id: Option<i32>,
    pub image_path: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::Id"
    )]
    Suppliers,
}

impl Related<super::suppliers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Suppliers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Encode the bounded image list for the single TEXT column; empty lists
/// are stored as NULL, matching the original on-disk format.
pub(crate) fn encode_image_paths(paths: &[String]) -> Option<String> {
    if paths.is_empty() {
        return None;
    }
    // Serializing a Vec<String> cannot fail.
    serde_json::to_string(paths).ok()
}

pub(crate) fn decode_image_paths(raw: Option<&str>) -> Result<Vec<String>, DbErr> {
    match raw {
        None => Ok(Vec::new()),
        Some(s) => serde_json::from_str(s)
            .map_err(|err| DbErr::Custom(format!("invalid image path list: {err}"))),
    }
}

/// Row to insert for a validated draft; the id is database-assigned and
/// `created_at` is stamped by the caller at insert time.
pub(crate) fn new_row(
    draft: &TransactionDraft,
    supplier_id: Option<i32>,
    created_at: DateTime<Utc>,
) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::NotSet,
        kind: ActiveValue::Set(draft.kind.as_str().to_string()),
        amount: ActiveValue::Set(draft.amount),
        category: ActiveValue::Set(Some(draft.category.clone())),
        note: ActiveValue::Set(draft.note.clone()),
        date: ActiveValue::Set(draft.date.clone()),
        payment_type: ActiveValue::Set(draft.payment_type.as_str().to_string()),
        supplier_id: ActiveValue::Set(supplier_id),
        image_path: ActiveValue::Set(encode_image_paths(&draft.image_paths)),
        created_at: ActiveValue::Set(created_at),
    }
}

impl TryFrom<Model> for Transaction {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount: model.amount,
            category: model.category,
            note: model.note,
            date: model.date,
            payment_type: PaymentType::try_from(model.payment_type.as_str())?,
            supplier_id: model.supplier_id,
            image_paths: decode_image_paths(model.image_path.as_deref())?,
            created_at: model.created_at,
        })
    }
}

impl TransactionWithSupplier {
    pub(crate) fn from_models(
        model: Model,
        supplier: Option<super::suppliers::Model>,
    ) -> Result<Self, LedgerError> {
        Ok(Self {
            transaction: Transaction::try_from(model)?,
            supplier_name: supplier.map(|s| s.name),
        })
    }
}
