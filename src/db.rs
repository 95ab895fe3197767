//! Database initialization.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, account::create_account_table, auth::create_user_table,
    transaction::create_transaction_table,
};

/// Create the application tables in the SQLite database at `connection`.
///
/// All tables are created within a single exclusive transaction so that a
/// partial initialization is rolled back. Foreign key enforcement is enabled
/// for the connection.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_account_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
