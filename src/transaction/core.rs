//! Defines the core data models and database queries for transactions.

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::{AccountId, TransactionId},
};

/// Whether a transaction took money out of an account or put money into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money leaving an account, e.g. a purchase or a bill.
    Payment,
    /// Money entering an account, e.g. a salary payment.
    Deposit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Payment => "payment",
            TransactionType::Deposit => "deposit",
        }
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "payment" => Ok(TransactionType::Payment),
            "deposit" => Ok(TransactionType::Deposit),
            other => Err(FromSqlError::Other(
                format!("invalid transaction type {other:?}").into(),
            )),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

/// A single payment or deposit recorded against an account.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The ID of the account the transaction belongs to.
    pub account_id: AccountId,
    /// Whether money left or entered the account.
    pub transaction_type: TransactionType,
    /// The amount of money moved, always non-negative.
    pub amount: f64,
    /// A free-text label used to group payments in reports. Payments without
    /// a category are reported under "Other".
    pub category: Option<String>,
    /// Who a payment was made to. Not meaningful for deposits.
    pub recipient_name: Option<String>,
    /// When the transaction happened.
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        account_id: AccountId,
        transaction_type: TransactionType,
        amount: f64,
        created_at: OffsetDateTime,
    ) -> TransactionBuilder {
        TransactionBuilder {
            account_id,
            transaction_type,
            amount,
            category: None,
            recipient_name: None,
            created_at,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The optional fields default to `None`. Pass the finished builder to
/// [create_transaction] to insert the row and get back the stored
/// [Transaction].
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The ID of the account the transaction belongs to.
    pub account_id: AccountId,
    /// Whether money left or entered the account.
    pub transaction_type: TransactionType,
    /// The amount of money moved, always non-negative.
    pub amount: f64,
    /// The category of a payment, e.g. "groceries", "entertainment".
    pub category: Option<String>,
    /// Who a payment was made to, e.g. "Netflix".
    pub recipient_name: Option<String>,
    /// When the transaction happened.
    pub created_at: OffsetDateTime,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Set the recipient name for the transaction.
    pub fn recipient_name(mut self, recipient_name: Option<String>) -> Self {
        self.recipient_name = recipient_name;
        self
    }
}

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is negative or not a number,
/// - or [Error::InvalidAccount] if the account ID does not refer to a real
///   account,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if !builder.amount.is_finite() || builder.amount < 0.0 {
        return Err(Error::InvalidAmount(builder.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (account_id, transaction_type, amount, category, recipient_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, account_id, transaction_type, amount, category, recipient_name, created_at",
        )?
        .query_row(
            (
                builder.account_id,
                builder.transaction_type,
                builder.amount,
                builder.category,
                builder.recipient_name,
                builder.created_at,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidAccount(builder.account_id),
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, account_id, transaction_type, amount, category, recipient_name, created_at
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    validate_amount(&transaction)?;

    Ok(transaction)
}

/// Retrieve all transactions, most recent first.
///
/// Each row is validated as it leaves the database so that the rest of the
/// application can assume amounts are finite and non-negative.
///
/// # Errors
/// This function will return a:
/// - [Error::MalformedRecord] if a stored amount is negative or not a number,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let transactions = connection
        .prepare(
            "SELECT id, account_id, transaction_type, amount, category, recipient_name, created_at
             FROM \"transaction\" ORDER BY created_at DESC",
        )?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    for transaction in &transactions {
        validate_amount(transaction)?;
    }

    Ok(transactions)
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let account_id = row.get(1)?;
    let transaction_type = row.get(2)?;
    let amount = row.get(3)?;
    let category = row.get(4)?;
    let recipient_name = row.get(5)?;
    let created_at = row.get(6)?;

    Ok(Transaction {
        id,
        account_id,
        transaction_type,
        amount,
        category,
        recipient_name,
        created_at,
    })
}

fn validate_amount(transaction: &Transaction) -> Result<(), Error> {
    if !transaction.amount.is_finite() || transaction.amount < 0.0 {
        return Err(Error::MalformedRecord(format!(
            "transaction {} has the invalid amount {}",
            transaction.id, transaction.amount
        )));
    }

    Ok(())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                account_id INTEGER NOT NULL,
                transaction_type TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT,
                recipient_name TEXT,
                created_at TEXT NOT NULL,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the transactions page and the insights snapshot query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_created_at ON \"transaction\"(created_at);",
        (),
    )?;

    Ok(())
}

#[cfg(test)]
mod create_table_tests {
    use rusqlite::Connection;

    use super::create_transaction_table;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_transaction_table(&connection));
    }
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{Error, account::create_account, db::initialize};

    use super::{
        Transaction, TransactionType, create_transaction, get_all_transactions, get_transaction,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        create_account("Checking", &connection).unwrap();
        connection
    }

    #[test]
    fn create_transaction_returns_inserted_row() {
        let connection = get_test_connection();

        let transaction = create_transaction(
            Transaction::build(
                1,
                TransactionType::Payment,
                45.99,
                datetime!(2024-01-05 12:00 UTC),
            )
            .category(Some("groceries".to_owned()))
            .recipient_name(Some("Countdown".to_owned())),
            &connection,
        )
        .unwrap();

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.account_id, 1);
        assert_eq!(transaction.transaction_type, TransactionType::Payment);
        assert_eq!(transaction.amount, 45.99);
        assert_eq!(transaction.category.as_deref(), Some("groceries"));
        assert_eq!(transaction.recipient_name.as_deref(), Some("Countdown"));
        assert_eq!(transaction.created_at, datetime!(2024-01-05 12:00 UTC));
    }

    #[test]
    fn create_transaction_rejects_negative_amount() {
        let connection = get_test_connection();

        let result = create_transaction(
            Transaction::build(
                1,
                TransactionType::Payment,
                -1.0,
                datetime!(2024-01-05 12:00 UTC),
            ),
            &connection,
        );

        assert_eq!(result, Err(Error::InvalidAmount(-1.0)));
    }

    #[test]
    fn create_transaction_rejects_nan_amount() {
        let connection = get_test_connection();

        let result = create_transaction(
            Transaction::build(
                1,
                TransactionType::Deposit,
                f64::NAN,
                datetime!(2024-01-05 12:00 UTC),
            ),
            &connection,
        );

        assert!(matches!(result, Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn create_transaction_rejects_unknown_account() {
        let connection = get_test_connection();

        let result = create_transaction(
            Transaction::build(
                999,
                TransactionType::Payment,
                10.0,
                datetime!(2024-01-05 12:00 UTC),
            ),
            &connection,
        );

        assert_eq!(result, Err(Error::InvalidAccount(999)));
    }

    #[test]
    fn get_transaction_returns_not_found_for_unknown_id() {
        let connection = get_test_connection();

        assert_eq!(get_transaction(42, &connection), Err(Error::NotFound));
    }

    #[test]
    fn get_transaction_round_trips() {
        let connection = get_test_connection();
        let inserted = create_transaction(
            Transaction::build(
                1,
                TransactionType::Deposit,
                2500.0,
                datetime!(2024-01-07 09:30 UTC),
            ),
            &connection,
        )
        .unwrap();

        assert_eq!(get_transaction(inserted.id, &connection), Ok(inserted));
    }

    #[test]
    fn get_all_transactions_sorts_most_recent_first() {
        let connection = get_test_connection();
        for (amount, created_at) in [
            (10.0, datetime!(2024-01-02 12:00 UTC)),
            (20.0, datetime!(2024-01-07 12:00 UTC)),
            (30.0, datetime!(2024-01-05 12:00 UTC)),
        ] {
            create_transaction(
                Transaction::build(1, TransactionType::Payment, amount, created_at),
                &connection,
            )
            .unwrap();
        }

        let amounts: Vec<f64> = get_all_transactions(&connection)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.amount)
            .collect();

        assert_eq!(amounts, vec![20.0, 30.0, 10.0]);
    }

    #[test]
    fn get_all_transactions_rejects_malformed_stored_amount() {
        let connection = get_test_connection();
        create_transaction(
            Transaction::build(
                1,
                TransactionType::Payment,
                12.5,
                datetime!(2024-01-05 12:00 UTC),
            ),
            &connection,
        )
        .unwrap();
        // Corrupt the stored amount behind the model's back.
        connection
            .execute("UPDATE \"transaction\" SET amount = -12.5", ())
            .unwrap();

        assert!(matches!(
            get_all_transactions(&connection),
            Err(Error::MalformedRecord(_))
        ));
    }

}
