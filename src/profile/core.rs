//! The financial profile model and its single-row table.

use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The settings that turn a ledger into a fortress level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    /// How much it costs to live for one month.
    pub monthly_living_cost: f64,
    /// The savings the user started with, before any recorded transactions.
    pub financial_reserve: f64,
    /// The most the user wants to spend in a month. Advisory only.
    pub monthly_spending_limit: f64,
}

impl Default for FinancialProfile {
    fn default() -> Self {
        Self {
            monthly_living_cost: 3000.0,
            financial_reserve: 15000.0,
            monthly_spending_limit: 2500.0,
        }
    }
}

impl FinancialProfile {
    /// Check that every field is a finite number and that the living cost and
    /// spending limit are not negative.
    ///
    /// # Errors
    /// Returns an [Error::InvalidProfile] naming the first invalid field.
    pub fn validate(self) -> Result<Self, Error> {
        let fields = [
            ("monthly_living_cost", self.monthly_living_cost, false),
            ("financial_reserve", self.financial_reserve, true),
            ("monthly_spending_limit", self.monthly_spending_limit, false),
        ];

        for (name, value, allow_negative) in fields {
            if !value.is_finite() {
                return Err(Error::InvalidProfile(format!("{name} must be a number")));
            }

            if !allow_negative && value < 0.0 {
                return Err(Error::InvalidProfile(format!("{name} cannot be negative")));
            }
        }

        Ok(self)
    }
}

/// Get the saved financial profile, or [FinancialProfile::default] if none
/// has been saved yet.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_profile(connection: &Connection) -> Result<FinancialProfile, Error> {
    let profile = connection
        .prepare(
            "SELECT monthly_living_cost, financial_reserve, monthly_spending_limit
             FROM financial_profile WHERE id = 1",
        )?
        .query_row([], map_profile_row)
        .optional()?;

    Ok(profile.unwrap_or_default())
}

/// Save the financial profile, replacing any previously saved profile.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn save_profile(profile: &FinancialProfile, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO financial_profile
            (id, monthly_living_cost, financial_reserve, monthly_spending_limit)
         VALUES (1, ?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
            monthly_living_cost = excluded.monthly_living_cost,
            financial_reserve = excluded.financial_reserve,
            monthly_spending_limit = excluded.monthly_spending_limit",
        (
            profile.monthly_living_cost,
            profile.financial_reserve,
            profile.monthly_spending_limit,
        ),
    )?;

    Ok(())
}

/// Create the financial profile table in the database.
///
/// The table holds at most one row.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_profile_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS financial_profile (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            monthly_living_cost REAL NOT NULL,
            financial_reserve REAL NOT NULL,
            monthly_spending_limit REAL NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_profile_row(row: &Row) -> Result<FinancialProfile, rusqlite::Error> {
    Ok(FinancialProfile {
        monthly_living_cost: row.get(0)?,
        financial_reserve: row.get(1)?,
        monthly_spending_limit: row.get(2)?,
    })
}
