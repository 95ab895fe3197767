use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{Error, database_id::AccountId};

/// A named account that transactions are recorded against.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The name of the account, unique across all accounts.
    pub name: String,
    /// When the account was created.
    pub created_at: OffsetDateTime,
}

pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_row_to_account(row: &rusqlite::Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let created_at = row.get(2)?;

    Ok(Account {
        id,
        name,
        created_at,
    })
}

/// Create an account called `name`.
///
/// The name is trimmed before it is stored.
///
/// # Errors
/// Returns [Error::EmptyAccountName] if `name` contains no visible
/// characters, [Error::DuplicateAccountName] if an account called `name`
/// already exists, or [Error::SqlError] for any other SQL error.
pub fn create_account(name: &str, connection: &Connection) -> Result<Account, Error> {
    let name = name.trim();

    if name.is_empty() {
        return Err(Error::EmptyAccountName);
    }

    connection
        .query_row(
            "INSERT INTO account (name, created_at) VALUES (?1, ?2) RETURNING *",
            (name, OffsetDateTime::now_utc()),
            map_row_to_account,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                Some(_),
            ) => Error::DuplicateAccountName(name.to_owned()),
            error => error.into(),
        })
}

/// Get all accounts, sorted by name.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_all_accounts(connection: &Connection) -> Result<Vec<Account>, Error> {
    let accounts = connection
        .prepare("SELECT id, name, created_at FROM account ORDER BY name ASC")?
        .query_map([], map_row_to_account)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(accounts)
}


#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;

    use crate::Error;

    use super::{create_account, create_account_table, get_all_accounts};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_account_table(&connection).unwrap();
        connection
    }

    #[test]
    fn create_account_returns_inserted_row() {
        let connection = get_test_connection();

        let account = create_account("Checking", &connection).unwrap();

        assert!(account.id > 0);
        assert_eq!(account.name, "Checking");
    }

    #[test]
    fn create_account_trims_name() {
        let connection = get_test_connection();

        let account = create_account("  Savings  ", &connection).unwrap();

        assert_eq!(account.name, "Savings");
    }

    #[test]
    fn create_account_rejects_empty_name() {
        let connection = get_test_connection();

        assert_eq!(
            create_account("   ", &connection),
            Err(Error::EmptyAccountName)
        );
    }

    #[test]
    fn create_account_rejects_duplicate_name() {
        let connection = get_test_connection();
        create_account("Checking", &connection).unwrap();

        assert_eq!(
            create_account("Checking", &connection),
            Err(Error::DuplicateAccountName("Checking".to_owned()))
        );
    }

    #[test]
    fn get_all_accounts_sorts_by_name() {
        let connection = get_test_connection();
        create_account("Savings", &connection).unwrap();
        create_account("Checking", &connection).unwrap();

        let names: Vec<String> = get_all_accounts(&connection)
            .unwrap()
            .into_iter()
            .map(|account| account.name)
            .collect();

        assert_eq!(names, vec!["Checking", "Savings"]);
    }

    #[test]
    fn get_all_accounts_returns_empty_vec_for_empty_table() {
        let connection = get_test_connection();

        assert_eq!(get_all_accounts(&connection), Ok(vec![]));
    }
}
