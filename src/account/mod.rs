//! Accounts that transactions are recorded against.

mod accounts_page;
mod core;
mod create_endpoint;

pub use accounts_page::{AccountsPageState, get_accounts_page};
pub use core::{Account, create_account, create_account_table, get_all_accounts};
pub use create_endpoint::{CreateAccountState, create_account_endpoint};
