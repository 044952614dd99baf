//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    Error,
    transaction::{TransactionId, TransactionState, core::delete_transaction},
};

/// A route handler for deleting a transaction, responds with 204 No Content
/// on success.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match delete_transaction(&transaction_id, &connection) {
        Ok(rows_affected) if rows_affected != 0 => {
            tracing::info!("deleted transaction {transaction_id}");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(_) => Err(Error::DeleteMissingTransaction),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            Err(error)
        }
    }
}
