/*! Sets up the application's SQLite database. */

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, category::create_custom_category_table, profile::create_profile_table,
    transaction::create_transaction_table,
};

/// Create all of the application's tables.
///
/// The tables are created in a single exclusive SQL transaction, and existing
/// tables are left untouched, so calling this on an already initialized
/// database is safe.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;
    create_profile_table(&transaction)?;
    create_custom_category_table(&transaction)?;

    transaction.commit()?;

    tracing::debug!("database initialized");

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        assert_eq!(initialize(&connection), Ok(()));
        assert_eq!(initialize(&connection), Ok(()));
    }
}
