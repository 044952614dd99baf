//! Defines the endpoint for listing transactions.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    transaction::{
        Transaction, TransactionKind, TransactionState,
        core::{get_all_transactions, get_transactions_by_kind},
    },
};

/// Query parameters for narrowing down the transaction list.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilter {
    /// Only list transactions of this kind.
    pub kind: Option<TransactionKind>,
}

/// A route handler that responds with the ledger, ordered by date.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    Query(filter): Query<TransactionFilter>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = match filter.kind {
        Some(kind) => get_transactions_by_kind(kind, &connection),
        None => get_all_transactions(&connection),
    }
    .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    Ok(Json(transactions))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Query, State},
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        category::CategoryName,
        db::initialize,
        transaction::{
            Transaction, TransactionKind, TransactionState, create_transaction,
            get_transactions_endpoint, list_endpoint::TransactionFilter,
        },
    };

    fn get_test_state() -> TransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        for (kind, category) in [
            (TransactionKind::Income, "Salary"),
            (TransactionKind::Expense, "Food"),
            (TransactionKind::Expense, "Housing"),
        ] {
            create_transaction(
                Transaction::build(
                    10.0,
                    date!(2025 - 02 - 14),
                    kind,
                    CategoryName::new(category).unwrap(),
                ),
                &conn,
            )
            .unwrap();
        }

        TransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn lists_all_transactions_without_filter() {
        let Json(transactions) =
            get_transactions_endpoint(State(get_test_state()), Query(TransactionFilter::default()))
                .await
                .unwrap();

        assert_eq!(transactions.len(), 3);
    }

    #[tokio::test]
    async fn filters_by_kind() {
        let Json(transactions) = get_transactions_endpoint(
            State(get_test_state()),
            Query(TransactionFilter {
                kind: Some(TransactionKind::Expense),
            }),
        )
        .await
        .unwrap();

        let categories: Vec<&str> = transactions
            .iter()
            .map(|transaction| transaction.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Food", "Housing"]);
    }
}
