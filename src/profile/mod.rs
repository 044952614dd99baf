//! The user's financial profile: the constants the fortress level is
//! calculated from.

mod core;
mod endpoints;

pub use core::{FinancialProfile, create_profile_table, get_profile, save_profile};
pub use endpoints::{get_profile_endpoint, update_profile_endpoint};
