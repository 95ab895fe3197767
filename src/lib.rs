//! SpendView is a self-hosted web application for recording payments and
//! deposits and viewing spending insights derived from them (spending by
//! category, income and expenses by month, daily spending, top merchants).
//!
//! The application stores data in SQLite and renders pages on the server with
//! maud and htmx. A single password protects the whole application.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use std::net::SocketAddr;
use time::Date;

pub use crate::{
    account::Account,
    app_state::AppState,
    auth::{PasswordHash, ValidatedPassword, set_password},
    database_id::{AccountId, DatabaseId, TransactionId, UserId},
    db::initialize as initialize_db,
    routing::build_router,
    transaction::{Transaction, TransactionType},
};

mod account;
mod alert;
mod app_state;
mod auth;
mod database_id;
mod db;
mod endpoints;
mod html;
mod insights;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;

/// Wait for a SIGINT or SIGTERM signal, then gracefully shut down the server,
/// giving in-flight connections one second to finish.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Received shutdown signal.");
    handle.graceful_shutdown(Some(std::time::Duration::from_secs(1)));
}

/// Errors that can occur within SpendView.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The password was incorrect or the auth cookie was invalid or expired.
    #[error("the provided credentials were invalid")]
    InvalidCredentials,

    /// The auth cookie was not set on the request.
    #[error("the auth cookie is missing")]
    CookieMissing,

    /// The password did not meet the minimum strength requirement.
    #[error("the password is too weak: {0}")]
    TooWeak(String),

    /// An error occurred while hashing a password.
    #[error("an error occurred while hashing the password: {0}")]
    HashingError(String),

    /// The date on a submitted transaction is in the future.
    #[error("the date {0} is in the future")]
    FutureDate(Date),

    /// The amount on a submitted transaction is negative or not a number.
    #[error("{0} is not a valid amount")]
    InvalidAmount(f64),

    /// A stored transaction row failed validation when it was read back.
    #[error("the database contains a malformed record: {0}")]
    MalformedRecord(String),

    /// A transaction referred to an account that does not exist.
    #[error("the account with ID {0} does not exist")]
    InvalidAccount(AccountId),

    /// An account name was submitted without any visible characters.
    #[error("the account name cannot be empty")]
    EmptyAccountName,

    /// An account with the same name already exists.
    #[error("an account named \"{0}\" already exists")]
    DuplicateAccountName(String),

    /// The requested resource could not be found in the database.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The configured timezone is not a canonical timezone name.
    #[error("{0} is not a valid canonical timezone name")]
    InvalidTimezone(String),

    /// The database lock could not be acquired, most likely because another
    /// thread panicked while holding it.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while serializing data to JSON.
    #[error("an error occurred while serializing to JSON: {0}")]
    JSONSerializationError(String),

    /// An unhandled SQL error.
    #[error("an unhandled SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {error}");
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => crate::not_found::get_404_not_found_response(),
            Error::InvalidTimezone(timezone) => {
                crate::internal_server_error::render_internal_server_error(
                    &format!("The timezone \"{timezone}\" is not valid."),
                    "Restart the server with a canonical timezone name such as \"Pacific/Auckland\".",
                )
            }
            Error::MalformedRecord(detail) => {
                tracing::error!("malformed record: {detail}");

                crate::internal_server_error::render_internal_server_error(
                    "The database contains a malformed transaction record.",
                    "Inspect the transaction table for rows with negative or non-numeric amounts.",
                )
            }
            error => {
                tracing::error!("an unhandled error occurred: {error}");

                crate::internal_server_error::render_internal_server_error(
                    "An unexpected error occurred.",
                    "Try refreshing the page.",
                )
            }
        }
    }
}

impl Error {
    /// Convert the error into an alert fragment that htmx swaps into the
    /// alert container of the current page.
    pub fn into_alert_response(self) -> Response {
        match self {
            Error::FutureDate(date) => alert::error_alert(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid date",
                &format!("The date {date} is in the future."),
            ),
            Error::InvalidAmount(amount) => alert::error_alert(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid amount",
                &format!("{amount} is not a valid amount. Enter a non-negative number."),
            ),
            Error::InvalidAccount(account_id) => alert::error_alert(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid account",
                &format!("The account with ID {account_id} does not exist."),
            ),
            Error::EmptyAccountName => alert::error_alert(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid account name",
                "The account name cannot be empty.",
            ),
            Error::DuplicateAccountName(name) => alert::error_alert(
                StatusCode::CONFLICT,
                "Duplicate account name",
                &format!("An account named \"{name}\" already exists."),
            ),
            error => {
                tracing::error!("an unhandled error occurred: {error}");

                alert::error_alert(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    "An unexpected error occurred. Try again.",
                )
            }
        }
    }
}
