//! Defines the endpoint for creating a new account.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, Error, account::create_account, endpoints};

/// The state needed to create an account.
#[derive(Debug, Clone)]
pub struct CreateAccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating an account.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    /// The name of the new account.
    pub name: String,
}

/// A route handler for creating a new account, redirects to the accounts view
/// on success.
pub async fn create_account_endpoint(
    State(state): State<CreateAccountState>,
    Form(form): Form<AccountForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_account(&form.name, &connection) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::ACCOUNTS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
