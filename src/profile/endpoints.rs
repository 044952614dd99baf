//! Route handlers for reading and saving the financial profile.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    profile::{FinancialProfile, get_profile, save_profile},
};

/// The state needed to get or save the financial profile.
#[derive(Debug, Clone)]
pub struct ProfileState {
    /// The database connection for managing the profile.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProfileState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with the current financial profile.
pub async fn get_profile_endpoint(
    State(state): State<ProfileState>,
) -> Result<Json<FinancialProfile>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let profile = get_profile(&connection)
        .inspect_err(|error| tracing::error!("could not get financial profile: {error}"))?;

    Ok(Json(profile))
}

/// A route handler for saving the financial profile, responds with the saved profile.
pub async fn update_profile_endpoint(
    State(state): State<ProfileState>,
    Json(profile): Json<FinancialProfile>,
) -> Result<Json<FinancialProfile>, Error> {
    let profile = profile
        .validate()
        .inspect_err(|error| tracing::warn!("rejected financial profile: {error}"))?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    save_profile(&profile, &connection)
        .inspect_err(|error| tracing::error!("could not save financial profile: {error}"))?;

    tracing::info!("saved financial profile");

    Ok(Json(profile))
}
