//! Defines the endpoints for the application and API routes.

/// The root of the application, redirects to the insights page.
pub const ROOT: &str = "/";

/// The insights page with spending charts and the top merchants table.
pub const INSIGHTS_VIEW: &str = "/insights";

/// The page listing all recorded transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";

/// The form page for recording a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";

/// The page listing accounts and the form for creating one.
pub const ACCOUNTS_VIEW: &str = "/accounts";

/// The log-in page.
pub const LOG_IN_VIEW: &str = "/log_in";

/// The registration page shown before a password has been set.
pub const REGISTER_VIEW: &str = "/register";

/// The page explaining how to reset a forgotten password.
pub const FORGOT_PASSWORD_VIEW: &str = "/forgot_password";

/// The internal server error page.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The endpoint that verifies the password and sets the auth cookie.
pub const LOG_IN_API: &str = "/api/log_in";

/// The endpoint that invalidates the auth cookie.
pub const LOG_OUT: &str = "/api/log_out";

/// The endpoint that registers the application user.
pub const USERS_API: &str = "/api/users";

/// The endpoint that creates a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";

/// The endpoint that creates an account.
pub const ACCOUNTS_API: &str = "/api/accounts";

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use super::*;

    #[test]
    fn endpoints_are_valid_uris() {
        let endpoints = [
            ROOT,
            INSIGHTS_VIEW,
            TRANSACTIONS_VIEW,
            NEW_TRANSACTION_VIEW,
            ACCOUNTS_VIEW,
            LOG_IN_VIEW,
            REGISTER_VIEW,
            FORGOT_PASSWORD_VIEW,
            INTERNAL_ERROR_VIEW,
            LOG_IN_API,
            LOG_OUT,
            USERS_API,
            TRANSACTIONS_API,
            ACCOUNTS_API,
        ];

        for endpoint in endpoints {
            endpoint
                .parse::<Uri>()
                .unwrap_or_else(|error| panic!("{endpoint} is not a valid URI: {error}"));
        }
    }
}
