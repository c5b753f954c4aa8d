use sea_orm::Database;

use ledger::{
    DAILY_ENTRY_CAP, Ledger, LedgerError, PaymentType, TransactionDraft, TransactionKind,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn ledger_with_db() -> Ledger {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Ledger::builder().database(db).build()
}

fn income(amount: f64, category: &str, date: &str) -> TransactionDraft {
    TransactionDraft {
        kind: TransactionKind::Income,
        amount,
        category: category.to_string(),
        note: None,
        date: date.to_string(),
        payment_type: PaymentType::Cash,
        supplier: None,
        image_paths: Vec::new(),
    }
}

fn expense(amount: f64, category: &str, supplier: &str, date: &str) -> TransactionDraft {
    TransactionDraft {
        kind: TransactionKind::Expense,
        amount,
        category: category.to_string(),
        note: None,
        date: date.to_string(),
        payment_type: PaymentType::Cash,
        supplier: Some(supplier.to_string()),
        image_paths: Vec::new(),
    }
}

#[tokio::test]
async fn amount_bounds_enforced_on_create() {
    let ledger = ledger_with_db().await;

    for bad in [0.0, -5.0, 20_000.01] {
        let err = ledger
            .create_transaction(&income(bad, "Sales", "2026-02-10"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, LedgerError::InvalidAmount(_)),
            "accepted amount {bad}"
        );
    }

    ledger
        .create_transaction(&income(0.01, "Sales", "2026-02-10"))
        .await
        .unwrap();
    ledger
        .create_transaction(&income(20_000.0, "Other Income", "2026-02-10"))
        .await
        .unwrap();
}

#[tokio::test]
async fn daily_cap_rejects_thirteenth_entry() {
    let ledger = ledger_with_db().await;

    for i in 0..DAILY_ENTRY_CAP {
        ledger
            .create_transaction(&income(100.0, &format!("cat{i}"), "2026-02-10"))
            .await
            .unwrap();
    }

    let err = ledger
        .create_transaction(&income(100.0, "one-more", "2026-02-10"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::DailyCapReached {
            kind: "income".to_string(),
            cap: DAILY_ENTRY_CAP,
        }
    );

    // Another day is unaffected.
    ledger
        .create_transaction(&income(100.0, "cat0", "2026-02-11"))
        .await
        .unwrap();
}

#[tokio::test]
async fn daily_cap_not_rechecked_on_edit() {
    let ledger = ledger_with_db().await;

    let mut ids = Vec::new();
    for i in 0..DAILY_ENTRY_CAP {
        let id = ledger
            .create_transaction(&income(100.0, &format!("cat{i}"), "2026-02-10"))
            .await
            .unwrap();
        ids.push(id);
    }

    // The day is full, but editing an existing entry must still succeed.
    ledger
        .update_transaction(ids[0], &income(250.0, "cat0", "2026-02-10"))
        .await
        .unwrap();

    let entries = ledger.transactions_by_date("2026-02-10").await.unwrap();
    let edited = entries
        .iter()
        .find(|e| e.transaction.id == ids[0])
        .unwrap();
    assert_eq!(edited.transaction.amount, 250.0);
}

#[tokio::test]
async fn income_duplicate_category_same_day_rejected() {
    let ledger = ledger_with_db().await;

    let id = ledger
        .create_transaction(&income(100.0, "Sales", "2026-02-10"))
        .await
        .unwrap();

    let err = ledger
        .create_transaction(&income(50.0, "Sales", "2026-02-10"))
        .await
        .unwrap_err();
    assert_eq!(err, LedgerError::DuplicateCategory("Sales".to_string()));

    // Different category or different day is fine.
    ledger
        .create_transaction(&income(50.0, "Other Income", "2026-02-10"))
        .await
        .unwrap();
    ledger
        .create_transaction(&income(50.0, "Sales", "2026-02-11"))
        .await
        .unwrap();

    // Editing the entry itself never collides with its own row.
    ledger
        .update_transaction(id, &income(175.0, "Sales", "2026-02-10"))
        .await
        .unwrap();
}

#[tokio::test]
async fn expense_duplicate_supplier_same_day_rejected() {
    let ledger = ledger_with_db().await;

    let id = ledger
        .create_transaction(&expense(300.0, "Stock Purchase", "Sharma Steel", "2026-02-10"))
        .await
        .unwrap();

    let err = ledger
        .create_transaction(&expense(80.0, "Transport", "Sharma Steel", "2026-02-10"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::DuplicateSupplier("Sharma Steel".to_string())
    );

    ledger
        .create_transaction(&expense(80.0, "Transport", "City Movers", "2026-02-10"))
        .await
        .unwrap();
    ledger
        .create_transaction(&expense(80.0, "Transport", "Sharma Steel", "2026-02-11"))
        .await
        .unwrap();

    ledger
        .update_transaction(
            id,
            &expense(320.0, "Stock Purchase", "Sharma Steel", "2026-02-10"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn expense_requires_supplier_income_forbids_it() {
    let ledger = ledger_with_db().await;

    let mut draft = expense(100.0, "Rent", "Landlord", "2026-02-10");
    draft.supplier = None;
    let err = ledger.create_transaction(&draft).await.unwrap_err();
    assert_eq!(err, LedgerError::MissingField("supplier".to_string()));

    // An income draft carrying a supplier name still stores a null id.
    let mut draft = income(100.0, "Sales", "2026-02-10");
    draft.supplier = Some("Sharma Steel".to_string());
    ledger.create_transaction(&draft).await.unwrap();

    let entries = ledger.transactions_by_date("2026-02-10").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].transaction.supplier_id, None);
    assert_eq!(entries[0].supplier_name, None);
}

#[tokio::test]
async fn transactions_by_date_joins_supplier_and_groups_by_kind() {
    let ledger = ledger_with_db().await;

    ledger
        .create_transaction(&income(500.0, "Sales", "2026-02-10"))
        .await
        .unwrap();
    ledger
        .create_transaction(&expense(120.0, "Transport", "City Movers", "2026-02-10"))
        .await
        .unwrap();
    ledger
        .create_transaction(&income(40.0, "Other Income", "2026-02-11"))
        .await
        .unwrap();

    let entries = ledger.transactions_by_date("2026-02-10").await.unwrap();
    assert_eq!(entries.len(), 2);
    // Ordered by kind: 'expense' sorts before 'income'.
    assert_eq!(entries[0].transaction.kind, TransactionKind::Expense);
    assert_eq!(entries[0].supplier_name.as_deref(), Some("City Movers"));
    assert_eq!(entries[1].transaction.kind, TransactionKind::Income);
    assert_eq!(entries[1].supplier_name, None);
}

#[tokio::test]
async fn date_range_is_inclusive_and_newest_first() {
    let ledger = ledger_with_db().await;

    for date in ["2026-02-01", "2026-02-15", "2026-03-01"] {
        ledger
            .create_transaction(&income(100.0, "Sales", date))
            .await
            .unwrap();
    }

    let entries = ledger
        .transactions_by_date_range("2026-02-01", "2026-02-28")
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].transaction.date, "2026-02-15");
    assert_eq!(entries[1].transaction.date, "2026-02-01");
}

#[tokio::test]
async fn summary_groups_totals_by_kind() {
    let ledger = ledger_with_db().await;

    ledger
        .create_transaction(&income(100.0, "Sales", "2026-02-10"))
        .await
        .unwrap();
    ledger
        .create_transaction(&income(200.0, "Other Income", "2026-02-12"))
        .await
        .unwrap();
    ledger
        .create_transaction(&expense(50.0, "Transport", "City Movers", "2026-02-11"))
        .await
        .unwrap();

    let totals = ledger
        .summary_by_date_range("2026-02-01", "2026-02-28")
        .await
        .unwrap();

    let total_for = |kind: &str| totals.iter().find(|t| t.kind == kind).map(|t| t.total);
    assert_eq!(total_for("income"), Some(300.0));
    assert_eq!(total_for("expense"), Some(50.0));

    // A range with no entries yields no groups at all.
    let totals = ledger
        .summary_by_date_range("2025-01-01", "2025-01-31")
        .await
        .unwrap();
    assert!(totals.is_empty());
}

#[tokio::test]
async fn update_overwrites_fields_but_not_created_at() {
    let ledger = ledger_with_db().await;

    let id = ledger
        .create_transaction(&income(100.0, "Sales", "2026-02-10"))
        .await
        .unwrap();
    let before = ledger.transactions_by_date("2026-02-10").await.unwrap();
    let created_at = before[0].transaction.created_at;

    let mut draft = income(150.0, "Other Income", "2026-02-12");
    draft.note = Some("corrected".to_string());
    ledger.update_transaction(id, &draft).await.unwrap();

    let after = ledger.transactions_by_date("2026-02-12").await.unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].transaction.amount, 150.0);
    assert_eq!(after[0].transaction.note.as_deref(), Some("corrected"));
    assert_eq!(after[0].transaction.created_at, created_at);
}

#[tokio::test]
async fn update_and_delete_missing_id_are_silent_noops() {
    let ledger = ledger_with_db().await;

    ledger
        .update_transaction(999, &income(100.0, "Sales", "2026-02-10"))
        .await
        .unwrap();
    ledger.delete_transaction(999).await.unwrap();

    let id = ledger
        .create_transaction(&income(100.0, "Sales", "2026-02-10"))
        .await
        .unwrap();
    ledger.delete_transaction(id).await.unwrap();
    assert!(ledger
        .transactions_by_date("2026-02-10")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn image_paths_round_trip_through_the_json_column() {
    let ledger = ledger_with_db().await;

    let mut draft = expense(90.0, "Repairs", "Fix It", "2026-02-10");
    draft.image_paths = vec![
        "bills/bill_1.jpg".to_string(),
        "bills/bill_2.jpg".to_string(),
    ];
    ledger.create_transaction(&draft).await.unwrap();

    let entries = ledger.transactions_by_date("2026-02-10").await.unwrap();
    assert_eq!(entries[0].transaction.image_paths, draft.image_paths);

    let mut draft = expense(90.0, "Repairs", "Other Shop", "2026-02-10");
    draft.image_paths = (0..8).map(|i| format!("bills/bill_{i}.jpg")).collect();
    let err = ledger.create_transaction(&draft).await.unwrap_err();
    assert_eq!(err, LedgerError::TooManyImages(7));
}

#[tokio::test]
async fn restart_reads_same_state_and_init_is_idempotent() {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("ledger_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    // Second init pass must leave definitions and data alone.
    migration::Migrator::up(&db, None).await.unwrap();

    let ledger = Ledger::builder().database(db).build();
    ledger
        .create_transaction(&expense(75.0, "Rent", "Landlord", "2026-02-10"))
        .await
        .unwrap();
    drop(ledger);

    let db2 = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db2, None).await.unwrap();
    let ledger2 = Ledger::builder().database(db2).build();

    let entries = ledger2.transactions_by_date("2026-02-10").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].transaction.amount, 75.0);
    assert_eq!(entries[0].supplier_name.as_deref(), Some("Landlord"));

    let _ = std::fs::remove_file(path);
}
