//! Fortress Level is a web service for tracking personal finances.
//!
//! Income, expenses and investments are recorded in a ledger, and the service
//! derives the user's "fortress level": how many months of living costs their
//! savings would cover.
//!
//! This library provides a JSON API over a SQLite database, plus the pure
//! functions used to aggregate the ledger.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use time::Date;
use tokio::signal;

mod app_state;
mod category;
mod currency;
mod dashboard;
mod db;
mod endpoints;
mod logging;
mod profile;
mod routing;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use category::{CategoryName, create_custom_category, default_categories, get_categories};
pub use currency::format_currency;
pub use dashboard::{
    CATEGORY_COLORS, Dashboard, ExpenseCategory, FinancialData, LevelProgress,
    compute_financial_data, expenses_by_category, fortress_level, integrated_reserve,
    monthly_total, spending_limit_excess,
};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use profile::{FinancialProfile, get_profile, save_profile};
pub use routing::build_router;
pub use timezone::{get_local_offset, local_today};
pub use transaction::{
    NewTransaction, Transaction, TransactionId, TransactionKind, create_transaction,
    delete_transaction, get_all_transactions, get_transaction, get_transactions_by_kind,
    recent_transactions,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction amount was zero, negative, NaN or infinite.
    ///
    /// The transaction kind carries the direction of the money, so amounts
    /// are always positive.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    InvalidAmount(f64),

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The category already exists for the transaction kind, either as a
    /// default category or as a custom category.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A financial profile field was outside its valid range.
    ///
    /// The string describes which field was invalid.
    #[error("invalid financial profile: {0}")]
    InvalidProfile(String),

    /// A string could not be parsed as a transaction kind.
    #[error("\"{0}\" is not a transaction kind, expected income, expense or investment")]
    InvalidKind(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidAmount(_)
            | Error::EmptyCategoryName
            | Error::FutureDate(_)
            | Error::InvalidProfile(_)
            | Error::InvalidKind(_) => StatusCode::BAD_REQUEST,
            Error::DuplicateCategory(_) => StatusCode::CONFLICT,
            Error::NotFound | Error::DeleteMissingTransaction => StatusCode::NOT_FOUND,
            Error::DatabaseLockError | Error::InvalidTimezoneError(_) | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            Error::InvalidTimezoneError(timezone) => format!(
                "Could not get local timezone \"{timezone}\". Check your server settings and \
                ensure the timezone has been set to valid, canonical timezone string"
            ),
            // Any other server errors are not intended to be shown to the client.
            error if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("An unexpected error occurred: {}", error);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            error => error.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use time::macros::date;

    use crate::Error;

    async fn get_error_message(error: Error) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        (status, json["error"].as_str().unwrap().to_owned())
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[tokio::test]
    async fn client_errors_include_message() {
        let (status, message) = get_error_message(Error::FutureDate(date!(2999 - 01 - 01))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("2999-01-01"), "got message {message}");
    }

    #[tokio::test]
    async fn duplicate_category_is_conflict() {
        let (status, message) =
            get_error_message(Error::DuplicateCategory("Food".to_owned())).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(message.contains("Food"), "got message {message}");
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let (status, message) = get_error_message(Error::SqlError(
            rusqlite::Error::InvalidColumnName("secret_column".to_owned()),
        ))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("secret_column"), "got message {message}");
    }
}
