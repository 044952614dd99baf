//! Route handlers for listing and creating categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    category::{CategoryName, create_custom_category, get_categories},
    transaction::TransactionKind,
};

/// The state needed to get or create categories.
#[derive(Debug, Clone)]
pub struct CategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for creating a custom category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryForm {
    /// The name of the new category.
    pub name: String,
}

/// The categories available for a transaction kind.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CategoryList {
    /// The transaction kind the categories belong to.
    pub kind: TransactionKind,
    /// Default categories followed by custom categories.
    pub categories: Vec<String>,
}

/// A route handler for listing the categories of a transaction kind.
pub async fn get_categories_endpoint(
    State(state): State<CategoryState>,
    Path(kind): Path<TransactionKind>,
) -> Result<Json<CategoryList>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_categories(kind, &connection)
        .inspect_err(|error| tracing::error!("could not get {kind} categories: {error}"))?;

    Ok(Json(CategoryList { kind, categories }))
}

/// A route handler for adding a custom category, responds with the updated
/// category list.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    Path(kind): Path<TransactionKind>,
    Json(form): Json<CategoryForm>,
) -> Result<Response, Error> {
    let name = CategoryName::new(&form.name)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    create_custom_category(kind, name, &connection)
        .inspect_err(|error| tracing::error!("could not create {kind} category: {error}"))?;

    let categories = get_categories(kind, &connection)?;

    Ok((StatusCode::CREATED, Json(CategoryList { kind, categories })).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{
            create_category_endpoint,
            endpoints::{CategoryForm, CategoryList, CategoryState},
            get_categories_endpoint,
        },
        db::initialize,
        transaction::TransactionKind,
    };

    fn get_test_state() -> CategoryState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        CategoryState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn creates_category_and_returns_list() {
        let state = get_test_state();

        let response = create_category_endpoint(
            State(state.clone()),
            Path(TransactionKind::Expense),
            Json(CategoryForm {
                name: " Pets ".to_owned(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let Json(list) = get_categories_endpoint(State(state), Path(TransactionKind::Expense))
            .await
            .unwrap();
        assert_eq!(list.kind, TransactionKind::Expense);
        assert_eq!(list.categories.last().map(String::as_str), Some("Pets"));
    }

    #[tokio::test]
    async fn rejects_empty_name() {
        let state = get_test_state();

        let result = create_category_endpoint(
            State(state),
            Path(TransactionKind::Income),
            Json(CategoryForm {
                name: "   ".to_owned(),
            }),
        )
        .await;

        let error = result.unwrap_err();
        assert_eq!(error, Error::EmptyCategoryName);
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn lists_defaults_for_fresh_database() {
        let state = get_test_state();

        let Json(list) = get_categories_endpoint(State(state), Path(TransactionKind::Investment))
            .await
            .unwrap();

        assert_eq!(
            list,
            CategoryList {
                kind: TransactionKind::Investment,
                categories: vec![
                    "Stocks".to_owned(),
                    "Fixed Income".to_owned(),
                    "Real Estate".to_owned(),
                    "Other".to_owned()
                ],
            }
        );
    }
}
