//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, transaction::TransactionKind};

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

const DEFAULT_INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Investments",
    "Sales",
    "Rent",
    "Dividends",
    "Bonus",
    "Other",
];

const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Housing",
    "Health",
    "Education",
    "Entertainment",
    "Clothing",
    "Other",
];

const DEFAULT_INVESTMENT_CATEGORIES: &[&str] = &["Stocks", "Fixed Income", "Real Estate", "Other"];

/// The built-in categories offered for `kind`.
pub fn default_categories(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => DEFAULT_INCOME_CATEGORIES,
        TransactionKind::Expense => DEFAULT_EXPENSE_CATEGORIES,
        TransactionKind::Investment => DEFAULT_INVESTMENT_CATEGORIES,
    }
}

#[cfg(test)]
mod category_name_tests {
    use crate::{Error, category::CategoryName};

    #[test]
    fn new_fails_on_empty_string() {
        assert_eq!(CategoryName::new(""), Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        assert_eq!(CategoryName::new("\n\t \r"), Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_trims_whitespace() {
        let name = CategoryName::new("  Pets ").unwrap();

        assert_eq!(name.as_ref(), "Pets");
    }
}
