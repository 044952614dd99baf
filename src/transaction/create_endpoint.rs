//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::CategoryName,
    timezone::local_today,
    transaction::{Transaction, TransactionKind, TransactionState, core::create_transaction},
};

/// The request body for creating a transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction, must be positive.
    pub amount: f64,
    /// Whether the money was earned, spent or invested.
    pub kind: TransactionKind,
    /// The category label.
    pub category: String,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The date when the transaction occurred, defaults to today.
    #[serde(default)]
    pub date: Option<Date>,
}

/// A route handler for creating a new transaction, responds with the created transaction.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Json(form): Json<TransactionForm>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let date = form.date.unwrap_or(today);

    if date > today {
        tracing::error!(
            "Tried to perform an operation with a future date (e.g., create a transaction)"
        );

        return Err(Error::FutureDate(date));
    }

    let category = CategoryName::new(&form.category)?;
    let new_transaction = Transaction::build(form.amount, date, form.kind, category)
        .description(form.description.as_deref());

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = create_transaction(new_transaction, &connection)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    tracing::info!("created {} transaction {}", transaction.kind, transaction.id);

    Ok((StatusCode::CREATED, Json(transaction)).into_response())
}
