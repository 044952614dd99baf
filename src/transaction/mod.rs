//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` builder for creating transactions
//! - Database functions for storing, querying, and deleting transactions
//! - Route handlers for the transaction API

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use core::{
    NewTransaction, Transaction, TransactionId, TransactionKind, create_transaction,
    create_transaction_table, delete_transaction, get_all_transactions, get_transaction,
    get_transactions_by_kind, recent_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::get_transactions_endpoint;

/// The state needed to list, create or delete transactions.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}
