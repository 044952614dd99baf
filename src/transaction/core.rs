//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::{Error, category::CategoryName};

// ============================================================================
// MODELS
// ============================================================================

/// The opaque, unique identifier of a transaction.
pub type TransactionId = String;

/// The three ways money can move through the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. a salary.
    Income,
    /// Money spent, e.g. rent or groceries.
    Expense,
    /// Money put aside into an investment.
    Investment,
}

impl TransactionKind {
    /// Every transaction kind, in display order.
    pub const ALL: [TransactionKind; 3] = [
        TransactionKind::Income,
        TransactionKind::Expense,
        TransactionKind::Investment,
    ];

    /// The lowercase name used in the database and the JSON API.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
            TransactionKind::Investment => "investment",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            "investment" => Ok(TransactionKind::Investment),
            other => Err(Error::InvalidKind(other.to_owned())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// An income, expense or investment recorded in the ledger.
///
/// Transactions are never updated in place, they are only created and deleted.
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money involved, always positive. The direction is given
    /// by `kind`.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// Whether the money was earned, spent or invested.
    pub kind: TransactionKind,
    /// The category label, e.g. "Food" or "Salary".
    pub category: String,
    /// An optional note about the transaction.
    pub description: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(
        amount: f64,
        date: Date,
        kind: TransactionKind,
        category: CategoryName,
    ) -> NewTransaction {
        NewTransaction {
            amount,
            date,
            kind,
            category,
            description: None,
        }
    }
}

/// A transaction that has not been saved to the database yet.
///
/// The ID is assigned by [create_transaction].
#[derive(Debug, PartialEq, Clone)]
pub struct NewTransaction {
    /// The amount of money, must be positive.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Whether the money was earned, spent or invested.
    pub kind: TransactionKind,
    /// The category label.
    pub category: CategoryName,
    /// An optional note about the transaction.
    pub description: Option<String>,
}

impl NewTransaction {
    /// Set the description for the transaction.
    ///
    /// Blank descriptions are stored as `None`.
    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = description
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(str::to_owned);
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const SELECT_COLUMNS: &str = "SELECT id, amount, date, kind, category, description FROM \"transaction\"";

/// Create a new transaction in the database and give it a fresh ID.
///
/// # Errors
/// This function will return an [Error::InvalidAmount] if the amount is not a
/// positive number, or an [Error::SqlError] if there is some SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if !new_transaction.amount.is_finite() || new_transaction.amount <= 0.0 {
        return Err(Error::InvalidAmount(new_transaction.amount));
    }

    let id = Uuid::new_v4().to_string();

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (id, amount, date, kind, category, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, amount, date, kind, category, description",
        )?
        .query_row(
            (
                id,
                new_transaction.amount,
                new_transaction.date,
                new_transaction.kind,
                new_transaction.category.as_ref(),
                new_transaction.description,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: &str, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!("{SELECT_COLUMNS} WHERE id = :id"))?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Get every transaction in the ledger, ordered by date and then by the order
/// they were recorded in.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!("{SELECT_COLUMNS} ORDER BY date ASC, rowid ASC"))?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Get the transactions of a single kind, in the same order as [get_all_transactions].
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_transactions_by_kind(
    kind: TransactionKind,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_COLUMNS} WHERE kind = :kind ORDER BY date ASC, rowid ASC"
        ))?
        .query_map(&[(":kind", &kind)], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// The number of rows changed by a query.
pub type RowsAffected = usize;

/// Delete the transaction with `id`.
///
/// Returns the number of rows deleted, which is zero if no transaction has
/// that ID.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn delete_transaction(id: &str, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])
        .map_err(Error::from)
}

/// The last `count` transactions of an ordered ledger, newest first.
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> Vec<Transaction> {
    transactions.iter().rev().take(count).cloned().collect()
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id TEXT PRIMARY KEY NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('income', 'expense', 'investment')),
                category TEXT NOT NULL,
                description TEXT
                )",
        (),
    )?;

    // Add composite index used by the dashboard.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_kind_date ON \"transaction\"(kind, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let kind = row.get(3)?;
    let category = row.get(4)?;
    let description = row.get(5)?;

    Ok(Transaction {
        id,
        amount,
        date,
        kind,
        category,
        description,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        category::CategoryName,
        db::initialize,
        transaction::{
            Transaction, TransactionKind, create_transaction, delete_transaction,
            get_all_transactions, get_transaction, get_transactions_by_kind, recent_transactions,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn category(name: &str) -> CategoryName {
        CategoryName::new(name).unwrap()
    }

    #[test]
    fn create_transaction_assigns_unique_ids() {
        let conn = get_test_connection();

        let first = create_transaction(
            Transaction::build(
                12.3,
                date!(2025 - 03 - 01),
                TransactionKind::Expense,
                category("Food"),
            ),
            &conn,
        )
        .unwrap();
        let second = create_transaction(
            Transaction::build(
                12.3,
                date!(2025 - 03 - 01),
                TransactionKind::Expense,
                category("Food"),
            ),
            &conn,
        )
        .unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn create_transaction_stores_all_fields() {
        let conn = get_test_connection();

        let created = create_transaction(
            Transaction::build(
                4200.0,
                date!(2025 - 03 - 05),
                TransactionKind::Income,
                category("Salary"),
            )
            .description(Some("March pay")),
            &conn,
        )
        .unwrap();

        assert_eq!(created.amount, 4200.0);
        assert_eq!(created.date, date!(2025 - 03 - 05));
        assert_eq!(created.kind, TransactionKind::Income);
        assert_eq!(created.category, "Salary");
        assert_eq!(created.description.as_deref(), Some("March pay"));
        assert_eq!(get_transaction(&created.id, &conn), Ok(created));
    }

    #[test]
    fn blank_description_is_stored_as_none() {
        let conn = get_test_connection();

        let created = create_transaction(
            Transaction::build(
                1.0,
                date!(2025 - 03 - 05),
                TransactionKind::Expense,
                category("Food"),
            )
            .description(Some("   ")),
            &conn,
        )
        .unwrap();

        assert_eq!(created.description, None);
    }

    #[test]
    fn create_transaction_rejects_non_positive_amounts() {
        let conn = get_test_connection();

        for amount in [0.0, -5.0, f64::INFINITY] {
            let result = create_transaction(
                Transaction::build(
                    amount,
                    date!(2025 - 03 - 05),
                    TransactionKind::Expense,
                    category("Food"),
                ),
                &conn,
            );

            assert_eq!(result, Err(Error::InvalidAmount(amount)));
        }

        assert!(get_all_transactions(&conn).unwrap().is_empty());
    }

    #[test]
    fn get_transaction_fails_on_unknown_id() {
        let conn = get_test_connection();

        assert_eq!(get_transaction("not-an-id", &conn), Err(Error::NotFound));
    }

    #[test]
    fn get_all_transactions_orders_by_date_then_insertion() {
        let conn = get_test_connection();
        let later = create_transaction(
            Transaction::build(
                1.0,
                date!(2025 - 03 - 10),
                TransactionKind::Expense,
                category("Food"),
            ),
            &conn,
        )
        .unwrap();
        let earlier = create_transaction(
            Transaction::build(
                2.0,
                date!(2025 - 03 - 01),
                TransactionKind::Income,
                category("Salary"),
            ),
            &conn,
        )
        .unwrap();
        let same_day_as_later = create_transaction(
            Transaction::build(
                3.0,
                date!(2025 - 03 - 10),
                TransactionKind::Investment,
                category("Stocks"),
            ),
            &conn,
        )
        .unwrap();

        let transactions = get_all_transactions(&conn).unwrap();

        assert_eq!(transactions, vec![earlier, later, same_day_as_later]);
    }

    #[test]
    fn get_transactions_by_kind_filters() {
        let conn = get_test_connection();
        let expense = create_transaction(
            Transaction::build(
                1.0,
                date!(2025 - 03 - 10),
                TransactionKind::Expense,
                category("Food"),
            ),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build(
                2.0,
                date!(2025 - 03 - 01),
                TransactionKind::Income,
                category("Salary"),
            ),
            &conn,
        )
        .unwrap();

        let expenses = get_transactions_by_kind(TransactionKind::Expense, &conn).unwrap();

        assert_eq!(expenses, vec![expense]);
    }

    #[test]
    fn delete_transaction_removes_row() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            Transaction::build(
                1.0,
                date!(2025 - 03 - 10),
                TransactionKind::Expense,
                category("Food"),
            ),
            &conn,
        )
        .unwrap();

        let rows_affected = delete_transaction(&transaction.id, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(get_transaction(&transaction.id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_transaction_affects_no_rows() {
        let conn = get_test_connection();

        assert_eq!(delete_transaction("missing", &conn), Ok(0));
    }

    #[test]
    fn recent_transactions_returns_newest_first() {
        let conn = get_test_connection();
        for day in 1..=7 {
            create_transaction(
                Transaction::build(
                    day as f64,
                    date!(2025 - 03 - 01).replace_day(day).unwrap(),
                    TransactionKind::Expense,
                    category("Food"),
                ),
                &conn,
            )
            .unwrap();
        }
        let transactions = get_all_transactions(&conn).unwrap();

        let recent = recent_transactions(&transactions, 5);

        let amounts: Vec<f64> = recent.iter().map(|transaction| transaction.amount).collect();
        assert_eq!(amounts, vec![7.0, 6.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn recent_transactions_handles_short_ledger() {
        assert!(recent_transactions(&[], 5).is_empty());
    }
}
