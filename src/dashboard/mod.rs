//! Dashboard module
//!
//! Folds the ledger and the financial profile into the figures shown on the
//! dashboard: monthly totals, the expense breakdown by category, the
//! effective reserve and the fortress level.

mod aggregation;
mod financial_data;
mod fortress;
mod handlers;

pub use aggregation::{
    CATEGORY_COLORS, ExpenseCategory, expenses_by_category, integrated_reserve, monthly_total,
};
pub use financial_data::{FinancialData, compute_financial_data, spending_limit_excess};
pub use fortress::{LevelProgress, fortress_level};
pub use handlers::{Dashboard, get_dashboard};
