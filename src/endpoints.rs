//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}', use [format_endpoint].

/// The dashboard summary: financial data, fortress level and recent transactions.
pub const DASHBOARD: &str = "/api/dashboard";
/// The transaction ledger, for listing and creating transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// A single transaction, for deleting it.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The user's financial profile.
pub const PROFILE: &str = "/api/profile";
/// The categories for a transaction kind.
pub const CATEGORIES: &str = "/api/categories/{kind}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// Assumes that the parameter is wrapped in braces and that there is only one
/// parameter, e.g. '/api/transactions/{transaction_id}'.
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let (Some(param_start), Some(param_end)) = (endpoint_path.find('{'), endpoint_path.find('}'))
    else {
        return endpoint_path.to_owned();
    };

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end + 1..]
    )
}

#[cfg(test)]
mod tests {
    use super::{CATEGORIES, DASHBOARD, TRANSACTION, format_endpoint};

    #[test]
    fn replaces_parameter() {
        assert_eq!(
            format_endpoint(TRANSACTION, "abc-123"),
            "/api/transactions/abc-123"
        );
        assert_eq!(format_endpoint(CATEGORIES, "expense"), "/api/categories/expense");
    }

    #[test]
    fn leaves_paths_without_parameters_alone() {
        assert_eq!(format_endpoint(DASHBOARD, "ignored"), DASHBOARD);
    }
}
