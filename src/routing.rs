//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get},
};

use crate::{
    AppState, Error,
    category::{create_category_endpoint, get_categories_endpoint},
    dashboard::get_dashboard,
    endpoints,
    profile::{get_profile_endpoint, update_profile_endpoint},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::DASHBOARD, get(get_dashboard))
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
        .route(
            endpoints::PROFILE,
            get(get_profile_endpoint).put(update_profile_endpoint),
        )
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The fallback for routes that do not exist.
async fn get_404_not_found() -> Error {
    Error::NotFound
}
