//! Fixed category lists per transaction kind.
//!
//! Income and expense draw from separate lists; the entry surfaces offer
//! these as pickers rather than free text.

use crate::TransactionKind;

pub const INCOME_CATEGORIES: &[&str] = &[
    "Sales",
    "Online Sales",
    "Due Collection",
    "Other Income",
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Stock Purchase",
    "Rent",
    "Salary",
    "Electricity",
    "Transport",
    "Packaging",
    "Repairs",
    "Other Expense",
];

/// Returns the category list for a kind.
pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// True if `category` belongs to the fixed list for `kind`.
pub fn is_known_category(kind: TransactionKind, category: &str) -> bool {
    categories_for(kind).contains(&category)
}
