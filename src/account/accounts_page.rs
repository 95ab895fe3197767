//! Displays accounts and the form for creating one.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{Account, get_all_accounts},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, loading_spinner,
    },
    navigation::NavBar,
};

/// The state needed for the [get_accounts_page] route handler.
#[derive(Debug, Clone)]
pub struct AccountsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn accounts_view(accounts: &[Account]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNTS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-md"
            {
                h1 class="text-xl font-bold" { "Accounts" }

                @if accounts.is_empty()
                {
                    p { "No accounts yet. Create one below to start recording transactions." }
                }
                @else
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            }
                        }

                        tbody
                        {
                            @for account in accounts
                            {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    th
                                        scope="row"
                                        class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                                    {
                                        (account.name)
                                    }
                                }
                            }
                        }
                    }
                }

                form
                    class="space-y-4"
                    hx-post=(endpoints::ACCOUNTS_API)
                    hx-target-error="#alert-container"
                {
                    div
                    {
                        label for="name" class=(FORM_LABEL_STYLE) { "Account name" }

                        input
                            type="text"
                            name="name"
                            id="name"
                            placeholder="e.g. Checking"
                            class=(FORM_TEXT_INPUT_STYLE)
                            required;
                    }

                    button
                        type="submit"
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        span id="indicator" class="htmx-indicator" { (loading_spinner()) }
                        "Create Account"
                    }
                }
            }
        }
    );

    base("Accounts", &[], &content)
}

/// A route handler for displaying the accounts page.
pub async fn get_accounts_page(State(state): State<AccountsPageState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_all_accounts(&connection) {
        Ok(accounts) => accounts_view(&accounts).into_response(),
        Err(error) => error.into_response(),
    }
}
