//! Database operations for custom categories.

use rusqlite::Connection;

use crate::{
    Error,
    category::{CategoryName, default_categories},
    transaction::TransactionKind,
};

/// Add a custom category for `kind`.
///
/// # Errors
/// This function will return an [Error::DuplicateCategory] if `name` is
/// already one of the default or custom categories for `kind`, or an
/// [Error::SqlError] if there is some other SQL error.
pub fn create_custom_category(
    kind: TransactionKind,
    name: CategoryName,
    connection: &Connection,
) -> Result<(), Error> {
    if default_categories(kind).contains(&name.as_ref()) {
        return Err(Error::DuplicateCategory(name.to_string()));
    }

    connection
        .execute(
            "INSERT INTO custom_category (kind, name) VALUES (?1, ?2)",
            (kind, name.as_ref()),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateCategory(name.to_string()),
            error => error.into(),
        })?;

    Ok(())
}

/// Get the categories available for `kind`: the defaults followed by the
/// custom categories in the order they were created.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_categories(kind: TransactionKind, connection: &Connection) -> Result<Vec<String>, Error> {
    let mut categories: Vec<String> = default_categories(kind)
        .iter()
        .map(|name| name.to_string())
        .collect();

    let custom_categories = connection
        .prepare("SELECT name FROM custom_category WHERE kind = :kind ORDER BY id ASC")?
        .query_map(&[(":kind", &kind)], |row| row.get(0))?
        .collect::<Result<Vec<String>, rusqlite::Error>>()?;

    categories.extend(custom_categories);

    Ok(categories)
}

/// Create the custom category table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_custom_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS custom_category (
            id INTEGER PRIMARY KEY,
            kind TEXT NOT NULL,
            name TEXT NOT NULL,
            UNIQUE(kind, name)
        )",
        (),
    )?;

    Ok(())
}
