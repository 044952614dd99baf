//! Dashboard HTTP handler.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{ExpenseCategory, expenses_by_category},
        financial_data::{FinancialData, compute_financial_data, spending_limit_excess},
        fortress::LevelProgress,
    },
    profile::{FinancialProfile, get_profile},
    timezone::local_today,
    transaction::{Transaction, get_all_transactions, recent_transactions},
};

/// How many of the latest transactions the dashboard lists.
pub const RECENT_TRANSACTION_COUNT: usize = 5;

/// The state needed for displaying the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions and the profile.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Monthly totals, investments and the fortress level.
    pub financial_data: FinancialData,
    /// The fortress level split into a whole level and progress to the next.
    pub level_progress: LevelProgress,
    /// This month's expenses grouped by category.
    pub expenses_by_category: Vec<ExpenseCategory>,
    /// How much this month's expenses exceed the spending limit, if they do.
    pub over_budget_by: Option<f64>,
    /// The latest transactions, newest first.
    pub recent_transactions: Vec<Transaction>,
}

/// A route handler that responds with the dashboard figures, computed from the
/// whole ledger for the current local month.
pub async fn get_dashboard(State(state): State<DashboardState>) -> Result<Json<Dashboard>, Error> {
    let today = local_today(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
    let profile = get_profile(&connection)
        .inspect_err(|error| tracing::error!("could not get financial profile: {error}"))?;

    Ok(Json(build_dashboard(&transactions, &profile, today)))
}

fn build_dashboard(
    transactions: &[Transaction],
    profile: &FinancialProfile,
    today: Date,
) -> Dashboard {
    let financial_data = compute_financial_data(transactions, profile, today);

    Dashboard {
        financial_data,
        level_progress: LevelProgress::from_level(financial_data.fortress_level),
        expenses_by_category: expenses_by_category(transactions, today),
        over_budget_by: spending_limit_excess(&financial_data, profile),
        recent_transactions: recent_transactions(transactions, RECENT_TRANSACTION_COUNT),
    }
}
