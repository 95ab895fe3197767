//! Defines the route handler for the page that displays transactions as a table.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::macros::format_description;

use crate::{
    AppState, Error,
    account::{Account, get_all_accounts},
    database_id::AccountId,
    endpoints,
    html::{
        CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    transaction::{Transaction, TransactionType, get_all_transactions},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The database connection for listing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn transaction_row(transaction: &Transaction, account_names: &HashMap<AccountId, String>) -> Markup {
    let date_format = format_description!("[day] [month repr:short] [year]");
    let date = transaction
        .created_at
        .format(date_format)
        .unwrap_or_else(|_| transaction.created_at.date().to_string());

    let account_name = account_names
        .get(&transaction.account_id)
        .map(String::as_str)
        .unwrap_or("-");

    let (amount_style, amount_prefix) = match transaction.transaction_type {
        TransactionType::Payment => ("text-red-600 dark:text-red-500", "-"),
        TransactionType::Deposit => ("text-green-600 dark:text-green-500", "+"),
    };

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (date) }

            td class=(TABLE_CELL_STYLE) { (account_name) }

            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(category) = &transaction.category
                {
                    span class=(CATEGORY_BADGE_STYLE) { (category) }
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(recipient_name) = &transaction.recipient_name
                {
                    (recipient_name)
                }
            }

            td class={ (TABLE_CELL_STYLE) " text-right whitespace-nowrap " (amount_style) }
            {
                (amount_prefix) (format_currency(transaction.amount))
            }
        }
    )
}

fn transactions_view(
    transactions: &[Transaction],
    account_names: &HashMap<AccountId, String>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-3xl"
            {
                div class="flex items-center justify-between"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "New transaction"
                    }
                }

                @if transactions.is_empty()
                {
                    p { "No transactions yet. Record one to see it here." }
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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Account" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Recipient" }
                                th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions
                            {
                                (transaction_row(transaction, account_names))
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &[], &content)
}

/// Render an overview of the user's transactions, most recent first.
pub async fn get_transactions_page(State(state): State<TransactionsPageState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let transactions = match get_all_transactions(&connection) {
        Ok(transactions) => transactions,
        Err(error) => return error.into_response(),
    };
    let account_names = match get_all_accounts(&connection) {
        Ok(accounts) => index_account_names(accounts),
        Err(error) => return error.into_response(),
    };

    transactions_view(&transactions, &account_names).into_response()
}

fn index_account_names(accounts: Vec<Account>) -> HashMap<AccountId, String> {
    accounts
        .into_iter()
        .map(|account| (account.id, account.name))
        .collect()
}
