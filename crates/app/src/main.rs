use std::error::Error;

use clap::{Args, Parser, Subcommand};
use ledger::{
    Ledger, LedgerError, PaymentType, TransactionDraft, TransactionKind, TransactionWithSupplier,
    categories_for, is_known_category,
};
use migration::MigratorTrait;
use sea_orm::Database;

mod settings;

#[derive(Parser, Debug)]
#[command(name = "shopbooks")]
#[command(about = "Small-business bookkeeping: income/expense entries, suppliers, reports")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`);
    /// falls back to the `settings.toml` value.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record an income entry.
    Income(IncomeAddArgs),
    /// Record an expense entry.
    Expense(ExpenseAddArgs),
    /// Edit or delete an existing entry.
    Entry(Entry),
    /// List the entries of one business day.
    Day(DayArgs),
    /// List entries in an inclusive date range.
    List(RangeArgs),
    /// Income/expense totals over an inclusive date range.
    Summary(RangeArgs),
    /// Manage suppliers.
    Supplier(Supplier),
    /// Print the fixed category lists.
    Categories,
}

#[derive(Args, Debug)]
struct IncomeAddArgs {
    #[arg(long)]
    amount: f64,
    #[arg(long)]
    category: String,
    #[arg(long)]
    note: Option<String>,
    /// Business day as YYYY-MM-DD; defaults to today.
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "cash", value_parser = parse_payment)]
    payment: PaymentType,
}

#[derive(Args, Debug)]
struct ExpenseAddArgs {
    #[arg(long)]
    amount: f64,
    #[arg(long)]
    category: String,
    #[arg(long)]
    supplier: String,
    #[arg(long)]
    note: Option<String>,
    /// Business day as YYYY-MM-DD; defaults to today.
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "cash", value_parser = parse_payment)]
    payment: PaymentType,
    /// Bill image location; repeat for up to 7 images.
    #[arg(long = "image")]
    images: Vec<String>,
}

#[derive(Args, Debug)]
struct Entry {
    #[command(subcommand)]
    command: EntryCommand,
}

#[derive(Subcommand, Debug)]
enum EntryCommand {
    Update(EntryUpdateArgs),
    Delete(EntryDeleteArgs),
}

#[derive(Args, Debug)]
struct EntryUpdateArgs {
    #[arg(long)]
    id: i32,
    #[arg(long, value_parser = parse_kind)]
    kind: TransactionKind,
    #[arg(long)]
    amount: f64,
    #[arg(long)]
    category: String,
    /// Supplier name; required when the entry is an expense.
    #[arg(long)]
    supplier: Option<String>,
    #[arg(long)]
    note: Option<String>,
    #[arg(long)]
    date: String,
    #[arg(long, default_value = "cash", value_parser = parse_payment)]
    payment: PaymentType,
    #[arg(long = "image")]
    images: Vec<String>,
}

#[derive(Args, Debug)]
struct EntryDeleteArgs {
    #[arg(long)]
    id: i32,
}

#[derive(Args, Debug)]
struct DayArgs {
    /// Business day as YYYY-MM-DD; defaults to today.
    #[arg(long)]
    date: Option<String>,
}

#[derive(Args, Debug)]
struct RangeArgs {
    #[arg(long)]
    from: String,
    #[arg(long)]
    to: String,
}

#[derive(Args, Debug)]
struct Supplier {
    #[command(subcommand)]
    command: SupplierCommand,
}

#[derive(Subcommand, Debug)]
enum SupplierCommand {
    List,
    Add(SupplierAddArgs),
}

#[derive(Args, Debug)]
struct SupplierAddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone: Option<String>,
}

fn parse_payment(raw: &str) -> Result<PaymentType, String> {
    PaymentType::try_from(raw).map_err(|_| format!("unsupported payment type: {raw}"))
}

fn parse_kind(raw: &str) -> Result<TransactionKind, String> {
    TransactionKind::try_from(raw).map_err(|_| format!("unsupported entry kind: {raw}"))
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// The original entry forms offered categories as a fixed picker, so free
/// text that is not on the list is rejected at this boundary.
fn check_category(kind: TransactionKind, category: &str) -> Result<(), String> {
    if is_known_category(kind, category) {
        return Ok(());
    }
    Err(format!(
        "unknown {} category \"{}\"; valid: {}",
        kind.as_str(),
        category,
        categories_for(kind).join(", ")
    ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "shopbooks={level},ledger={level}",
            level = settings.app.level
        ))
        .init();

    let url = cli
        .database_url
        .unwrap_or_else(|| settings.database.url.clone());
    let db = Database::connect(&url).await?;
    migration::Migrator::up(&db, None).await?;
    let ledger = Ledger::builder().database(db).build();

    match cli.command {
        Command::Income(args) => {
            if let Err(msg) = check_category(TransactionKind::Income, &args.category) {
                eprintln!("{msg}");
                std::process::exit(1);
            }
            let draft = TransactionDraft {
                kind: TransactionKind::Income,
                amount: args.amount,
                category: args.category,
                note: args.note,
                date: args.date.unwrap_or_else(today),
                payment_type: args.payment,
                supplier: None,
                image_paths: Vec::new(),
            };
            report_write(ledger.create_transaction(&draft).await.map(|id| {
                format!("Transaction saved (#{id})")
            }));
        }
        Command::Expense(args) => {
            if let Err(msg) = check_category(TransactionKind::Expense, &args.category) {
                eprintln!("{msg}");
                std::process::exit(1);
            }
            let draft = TransactionDraft {
                kind: TransactionKind::Expense,
                amount: args.amount,
                category: args.category,
                note: args.note,
                date: args.date.unwrap_or_else(today),
                payment_type: args.payment,
                supplier: Some(args.supplier),
                image_paths: args.images,
            };
            report_write(ledger.create_transaction(&draft).await.map(|id| {
                format!("Transaction saved (#{id})")
            }));
        }
        Command::Entry(entry) => match entry.command {
            EntryCommand::Update(args) => {
                if let Err(msg) = check_category(args.kind, &args.category) {
                    eprintln!("{msg}");
                    std::process::exit(1);
                }
                let draft = TransactionDraft {
                    kind: args.kind,
                    amount: args.amount,
                    category: args.category,
                    note: args.note,
                    date: args.date,
                    payment_type: args.payment,
                    supplier: args.supplier,
                    image_paths: args.images,
                };
                report_write(
                    ledger
                        .update_transaction(args.id, &draft)
                        .await
                        .map(|()| "Transaction updated".to_string()),
                );
            }
            EntryCommand::Delete(args) => {
                report_write(
                    ledger
                        .delete_transaction(args.id)
                        .await
                        .map(|()| "Transaction deleted".to_string()),
                );
            }
        },
        Command::Day(args) => {
            let date = args.date.unwrap_or_else(today);
            let entries = ledger.transactions_by_date(&date).await?;
            print_entries(&entries);
        }
        Command::List(args) => {
            let entries = ledger
                .transactions_by_date_range(&args.from, &args.to)
                .await?;
            print_entries(&entries);
        }
        Command::Summary(args) => {
            let totals = ledger.summary_by_date_range(&args.from, &args.to).await?;
            let total_for = |kind: TransactionKind| {
                totals
                    .iter()
                    .find(|t| t.kind == kind.as_str())
                    .map_or(0.0, |t| t.total)
            };
            let income = total_for(TransactionKind::Income);
            let expense = total_for(TransactionKind::Expense);
            println!("{} .. {}", args.from, args.to);
            println!("  income:  {income:.2}");
            println!("  expense: {expense:.2}");
            println!("  net:     {:.2}", income - expense);
        }
        Command::Supplier(supplier) => match supplier.command {
            SupplierCommand::List => {
                for s in ledger.list_suppliers().await? {
                    let phone = s.phone.as_deref().unwrap_or("-");
                    println!("#{:<4} {:<24} {}", s.id, s.name, phone);
                }
            }
            SupplierCommand::Add(args) => {
                let id = ledger
                    .create_supplier(&args.name, args.phone.as_deref())
                    .await?;
                println!("Supplier saved (#{id})");
            }
        },
        Command::Categories => {
            println!("income:  {}", categories_for(TransactionKind::Income).join(", "));
            println!("expense: {}", categories_for(TransactionKind::Expense).join(", "));
        }
    }

    Ok(())
}

/// Last line of defense for write failures: validation errors carry their
/// own user-facing message; storage errors get a generic one and the cause
/// goes to the log.
fn report_write(result: Result<String, LedgerError>) {
    match result {
        Ok(confirmation) => println!("{confirmation}"),
        Err(err) if err.is_validation() => {
            eprintln!("{err}");
            std::process::exit(1);
        }
        Err(err) => {
            tracing::error!("storage failure: {err}");
            eprintln!("Error saving transaction");
            std::process::exit(1);
        }
    }
}

fn print_entries(entries: &[TransactionWithSupplier]) {
    if entries.is_empty() {
        println!("No entries");
        return;
    }
    for e in entries {
        let tx = &e.transaction;
        let supplier = e.supplier_name.as_deref().unwrap_or("-");
        let note = tx.note.as_deref().unwrap_or("");
        println!(
            "#{:<4} {} {:<7} {:>9.2} {:<16} {:<16} {:<8} {}",
            tx.id,
            tx.date,
            tx.kind.as_str(),
            tx.amount,
            tx.category.as_deref().unwrap_or("-"),
            supplier,
            tx.payment_type.as_str(),
            note,
        );
    }
}
