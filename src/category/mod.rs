//! Category labels for transactions.
//!
//! Each transaction kind has a fixed list of default categories, and users can
//! add their own custom categories on top of those.

mod db;
mod domain;
mod endpoints;

pub use db::{create_custom_category, create_custom_category_table, get_categories};
pub use domain::{CategoryName, default_categories};
pub use endpoints::{create_category_endpoint, get_categories_endpoint};
