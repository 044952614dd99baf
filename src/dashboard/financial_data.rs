//! The summary figures derived from the ledger and the financial profile.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    dashboard::{
        aggregation::{integrated_reserve, lifetime_total, monthly_total},
        fortress::fortress_level,
    },
    profile::FinancialProfile,
    transaction::{Transaction, TransactionKind},
};

/// A snapshot of the user's finances. Recomputed on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    /// Income recorded this calendar month.
    pub monthly_income: f64,
    /// Expenses recorded this calendar month.
    pub monthly_expenses: f64,
    /// This month's income minus this month's expenses.
    pub current_balance: f64,
    /// Everything ever invested.
    pub total_investments: f64,
    /// Months of living costs covered by the effective reserve.
    pub fortress_level: f64,
}

/// Compute the dashboard figures for the month containing `today`.
///
/// The fortress level uses the lifetime reserve from [integrated_reserve],
/// not just this month's balance.
pub fn compute_financial_data(
    transactions: &[Transaction],
    profile: &FinancialProfile,
    today: Date,
) -> FinancialData {
    let monthly_income = monthly_total(transactions, TransactionKind::Income, today);
    let monthly_expenses = monthly_total(transactions, TransactionKind::Expense, today);
    let effective_reserve = integrated_reserve(transactions, profile.financial_reserve);

    FinancialData {
        monthly_income,
        monthly_expenses,
        current_balance: monthly_income - monthly_expenses,
        total_investments: lifetime_total(transactions, TransactionKind::Investment),
        fortress_level: fortress_level(effective_reserve, profile.monthly_living_cost),
    }
}

/// How far this month's expenses went over the spending limit, or `None` if
/// they are within it.
pub fn spending_limit_excess(
    financial_data: &FinancialData,
    profile: &FinancialProfile,
) -> Option<f64> {
    let excess = financial_data.monthly_expenses - profile.monthly_spending_limit;

    (excess > 0.0).then_some(excess)
}
