//! Payment and deposit records and their pages.

mod core;
mod create_endpoint;
mod create_page;
mod transactions_page;

pub use core::{
    Transaction, TransactionBuilder, TransactionType, create_transaction,
    create_transaction_table, get_all_transactions, get_transaction,
};
pub use create_endpoint::{CreateTransactionState, create_transaction_endpoint};
pub use create_page::{NewTransactionPageState, get_new_transaction_page};
pub use transactions_page::{TransactionsPageState, get_transactions_page};
