//! Renders the page with the form for recording a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    account::{Account, get_all_accounts},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
        dollar_input_styles, link, loading_spinner,
    },
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::TransactionType,
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The database connection for listing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

fn new_transaction_view(accounts: &[Account], max_date: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-md"
            {
                h1 class="text-xl font-bold" { "New Transaction" }

                @if accounts.is_empty()
                {
                    p
                    {
                        "Transactions need an account to belong to. "
                        (link(endpoints::ACCOUNTS_VIEW, "Create an account first."))
                    }
                }
                @else
                {
                    form
                        class="space-y-4"
                        hx-post=(endpoints::TRANSACTIONS_API)
                        hx-target-error="#alert-container"
                    {
                        div
                        {
                            label for="account_id" class=(FORM_LABEL_STYLE) { "Account" }

                            select
                                name="account_id"
                                id="account_id"
                                class=(FORM_TEXT_INPUT_STYLE)
                                required
                            {
                                @for account in accounts
                                {
                                    option value=(account.id) { (account.name) }
                                }
                            }
                        }

                        div
                        {
                            label for="transaction_type" class=(FORM_LABEL_STYLE) { "Type" }

                            select
                                name="transaction_type"
                                id="transaction_type"
                                class=(FORM_TEXT_INPUT_STYLE)
                                required
                            {
                                option value=(TransactionType::Payment.as_str()) { "Payment" }
                                option value=(TransactionType::Deposit.as_str()) { "Deposit" }
                            }
                        }

                        div
                        {
                            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                            div class="dollar-input"
                            {
                                input
                                    type="number"
                                    name="amount"
                                    id="amount"
                                    min="0"
                                    step=".01"
                                    placeholder="0.00"
                                    class=(FORM_TEXT_INPUT_STYLE)
                                    required;
                            }
                        }

                        div
                        {
                            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                            input
                                type="date"
                                name="date"
                                id="date"
                                value=(max_date)
                                max=(max_date)
                                class=(FORM_TEXT_INPUT_STYLE)
                                required;
                        }

                        div
                        {
                            label for="category" class=(FORM_LABEL_STYLE) { "Category (optional)" }

                            input
                                type="text"
                                name="category"
                                id="category"
                                placeholder="e.g. groceries"
                                class=(FORM_TEXT_INPUT_STYLE);
                        }

                        div
                        {
                            label for="recipient_name" class=(FORM_LABEL_STYLE) { "Recipient (optional)" }

                            input
                                type="text"
                                name="recipient_name"
                                id="recipient_name"
                                placeholder="e.g. Netflix"
                                class=(FORM_TEXT_INPUT_STYLE);
                        }

                        button
                            type="submit"
                            class=(BUTTON_PRIMARY_STYLE)
                        {
                            span id="indicator" class="htmx-indicator" { (loading_spinner()) }
                            "Create Transaction"
                        }
                    }
                }
            }
        }
    );

    base("New Transaction", &[dollar_input_styles()], &content)
}

/// Renders the page for creating a transaction.
pub async fn get_new_transaction_page(State(state): State<NewTransactionPageState>) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        return Error::InvalidTimezone(state.local_timezone).into_response();
    };
    let max_date = OffsetDateTime::now_utc().to_offset(local_offset).date();

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_all_accounts(&connection) {
        Ok(accounts) => new_transaction_view(&accounts, max_date).into_response(),
        Err(error) => error.into_response(),
    }
}
