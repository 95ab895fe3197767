//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    database_id::AccountId,
    endpoints,
    timezone::get_local_offset,
    transaction::{Transaction, TransactionType, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The account the transaction belongs to.
    pub account_id: AccountId,
    /// Whether money left or entered the account.
    pub transaction_type: TransactionType,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// A free-text label used to group payments in reports.
    #[serde(default)]
    pub category: Option<String>,
    /// Who a payment was made to.
    #[serde(default)]
    pub recipient_name: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let Some(local_timezone) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezone(state.local_timezone).into_alert_response();
    };

    let now_local_time = OffsetDateTime::now_utc().to_offset(local_timezone);

    if form.date > now_local_time.date() {
        tracing::error!("Tried to create a transaction with a future date");

        return Error::FutureDate(form.date).into_alert_response();
    }

    // Recipients only make sense for payments.
    let recipient_name = match form.transaction_type {
        TransactionType::Payment => non_empty(form.recipient_name),
        TransactionType::Deposit => None,
    };

    let builder = Transaction::build(
        form.account_id,
        form.transaction_type,
        form.amount,
        form.date.midnight().assume_utc(),
    )
    .category(non_empty(form.category))
    .recipient_name(recipient_name);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_transaction(builder, &connection) {
        tracing::error!("could not create transaction: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod create_transaction_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response, response::IntoResponse};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::{Duration, OffsetDateTime};

    use crate::{
        account::create_account,
        db::initialize,
        endpoints,
        transaction::{TransactionType, get_transaction},
    };

    use super::{CreateTransactionState, TransactionForm, create_transaction_endpoint};

    fn get_test_state() -> CreateTransactionState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        create_account("Checking", &connection).unwrap();

        CreateTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();

        let form = TransactionForm {
            account_id: 1,
            transaction_type: TransactionType::Payment,
            amount: 12.3,
            date: OffsetDateTime::now_utc().date(),
            category: Some("groceries".to_string()),
            recipient_name: Some("Countdown".to_string()),
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_redirects_to_transactions_view(response);

        // The first transaction will have ID 1.
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.amount, 12.3);
        assert_eq!(transaction.category.as_deref(), Some("groceries"));
        assert_eq!(transaction.recipient_name.as_deref(), Some("Countdown"));
    }

    #[tokio::test]
    async fn empty_category_is_stored_as_null() {
        let state = get_test_state();

        let form = TransactionForm {
            account_id: 1,
            transaction_type: TransactionType::Payment,
            amount: 5.0,
            date: OffsetDateTime::now_utc().date(),
            category: Some("".to_string()),
            recipient_name: None,
        };

        create_transaction_endpoint(State(state.clone()), Form(form)).await;

        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.category, None);
    }

    #[tokio::test]
    async fn deposits_drop_recipient_name() {
        let state = get_test_state();

        let form = TransactionForm {
            account_id: 1,
            transaction_type: TransactionType::Deposit,
            amount: 2500.0,
            date: OffsetDateTime::now_utc().date(),
            category: None,
            recipient_name: Some("Employer".to_string()),
        };

        create_transaction_endpoint(State(state.clone()), Form(form)).await;

        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.transaction_type, TransactionType::Deposit);
        assert_eq!(transaction.recipient_name, None);
    }

    #[tokio::test]
    async fn rejects_future_date() {
        let state = get_test_state();

        let form = TransactionForm {
            account_id: 1,
            transaction_type: TransactionType::Payment,
            amount: 10.0,
            date: OffsetDateTime::now_utc().date() + Duration::days(1),
            category: None,
            recipient_name: None,
        };

        let response = create_transaction_endpoint(State(state), Form(form))
            .await
            .into_response();

        assert_eq!(
            response.status(),
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn rejects_unknown_account() {
        let state = get_test_state();

        let form = TransactionForm {
            account_id: 999,
            transaction_type: TransactionType::Payment,
            amount: 10.0,
            date: OffsetDateTime::now_utc().date(),
            category: None,
            recipient_name: None,
        };

        let response = create_transaction_endpoint(State(state), Form(form))
            .await
            .into_response();

        assert_eq!(
            response.status(),
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[track_caller]
    fn assert_redirects_to_transactions_view(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location,
            endpoints::TRANSACTIONS_VIEW,
            "got redirect to {location:?}, want redirect to {}",
            endpoints::TRANSACTIONS_VIEW
        );
    }
}
