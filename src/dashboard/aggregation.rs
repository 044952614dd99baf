//! Transaction aggregation for the dashboard.
//!
//! Provides functions to total transactions for the current month, group the
//! month's expenses by category, and calculate the lifetime reserve balance.
//!
//! Every function here is pure. The current month is passed in as `today`
//! rather than read from the clock.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::transaction::{Transaction, TransactionKind};

/// The colors assigned to expense categories, in order of first appearance.
pub const CATEGORY_COLORS: [&str; 6] = [
    "#FFD700", "#1E40AF", "#000000", "#4B5563", "#F59E0B", "#EF4444",
];

/// The total spent in one expense category this month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    /// The category label.
    pub name: String,
    /// The sum of this month's expenses in the category.
    pub amount: f64,
    /// The share of this month's expenses, from 0 to 100.
    pub percentage: f64,
    /// The display color, taken from [CATEGORY_COLORS].
    pub color: String,
}

fn is_same_month(date: Date, today: Date) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

/// Sums the amounts of the transactions of `kind` that happened in the same
/// calendar month and year as `today`.
pub fn monthly_total(transactions: &[Transaction], kind: TransactionKind, today: Date) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind && is_same_month(transaction.date, today))
        .map(|transaction| transaction.amount)
        .sum()
}

/// Sums the amounts of all transactions of `kind`, regardless of date.
pub(super) fn lifetime_total(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .map(|transaction| transaction.amount)
        .sum()
}

/// Groups this month's expenses by category.
///
/// Categories are matched exactly (case-sensitive) and returned in the order
/// they first appear in `transactions`. Colors cycle through
/// [CATEGORY_COLORS] in that same order. Percentages are 0 when there is
/// nothing to divide by.
///
/// # Returns
/// One entry per category with at least one expense this month, or an empty
/// vector when there were no expenses this month.
pub fn expenses_by_category(transactions: &[Transaction], today: Date) -> Vec<ExpenseCategory> {
    let mut category_index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, f64)> = Vec::new();

    for expense in transactions.iter().filter(|transaction| {
        transaction.kind == TransactionKind::Expense && is_same_month(transaction.date, today)
    }) {
        let name = expense.category.as_str();

        match category_index.get(name) {
            Some(&index) => totals[index].1 += expense.amount,
            None => {
                category_index.insert(name, totals.len());
                totals.push((name, expense.amount));
            }
        }
    }

    let total_expenses: f64 = totals.iter().map(|(_, amount)| amount).sum();

    totals
        .into_iter()
        .enumerate()
        .map(|(index, (name, amount))| ExpenseCategory {
            name: name.to_owned(),
            amount,
            percentage: if total_expenses > 0.0 {
                amount / total_expenses * 100.0
            } else {
                0.0
            },
            color: CATEGORY_COLORS[index % CATEGORY_COLORS.len()].to_owned(),
        })
        .collect()
}

/// Calculates the effective reserve: the baseline reserve plus the lifetime
/// net income, plus everything invested.
///
/// Unlike [monthly_total], every transaction counts regardless of its date.
/// The result is never negative.
pub fn integrated_reserve(transactions: &[Transaction], baseline_reserve: f64) -> f64 {
    let total_income = lifetime_total(transactions, TransactionKind::Income);
    let total_expenses = lifetime_total(transactions, TransactionKind::Expense);
    let total_investments = lifetime_total(transactions, TransactionKind::Investment);

    let reserve = baseline_reserve + (total_income - total_expenses) + total_investments;

    reserve.max(0.0)
}
