//! Code for creating the user table and fetching the user from the database.
//!
//! SpendView is a single-user application, so the user with ID 1 is the only
//! user that ever exists.

use rusqlite::Connection;

use crate::{Error, auth::password::PasswordHash, database_id::UserId};

/// A user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserId,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                password TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn create_user(password_hash: PasswordHash, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (password) VALUES (?1)",
        (password_hash.as_ref(),),
    )?;

    let id = connection.last_insert_rowid();

    Ok(User { id, password_hash })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the database.
pub fn get_user_by_id(user_id: UserId, db_connection: &Connection) -> Result<User, Error> {
    db_connection
        .prepare("SELECT id, password FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id)], |row| {
            let id = row.get(0)?;
            let raw_password_hash: String = row.get(1)?;
            let password_hash = PasswordHash::new_unchecked(&raw_password_hash);

            Ok(User { id, password_hash })
        })
        .map_err(|error| error.into())
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn count_users(connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM user;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Set the password for the user with ID 1, creating the user if it does not
/// exist yet. Used by the password reset tool.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn set_password(password_hash: PasswordHash, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE user SET password = ?1 WHERE id = 1",
        (password_hash.as_ref(),),
    )?;

    if rows_affected == 0 {
        connection.execute(
            "INSERT INTO user (id, password) VALUES (1, ?1)",
            (password_hash.as_ref(),),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod user_tests {
    use rusqlite::Connection;

    use crate::auth::password::PasswordHash;

    use super::{Error, count_users, create_user, create_user_table, get_user_by_id, set_password};

    fn get_db_connection() -> Connection {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_user_table(&conn).expect("Could not create user table");

        conn
    }

    #[test]
    fn insert_user_succeeds() {
        let db_connection = get_db_connection();
        let password_hash = PasswordHash::new_unchecked("hunter2");

        let inserted_user = create_user(password_hash.clone(), &db_connection).unwrap();

        assert!(inserted_user.id > 0);
        assert_eq!(inserted_user.password_hash, password_hash);
    }

    #[test]
    fn get_user_fails_with_non_existent_id() {
        let db_connection = get_db_connection();

        assert_eq!(get_user_by_id(42, &db_connection), Err(Error::NotFound));
    }

    #[test]
    fn get_user_succeeds_with_existing_id() {
        let db_connection = get_db_connection();
        let test_user =
            create_user(PasswordHash::new_unchecked("hunter2"), &db_connection).unwrap();

        let retrieved_user = get_user_by_id(test_user.id, &db_connection).unwrap();

        assert_eq!(retrieved_user, test_user);
    }

    #[test]
    fn returns_correct_count() {
        let db_connection = get_db_connection();

        let count = count_users(&db_connection).expect("Could not get user count");
        assert_eq!(0, count, "Want zero users before insertion, got {count}");

        create_user(PasswordHash::new_unchecked("hunter2"), &db_connection).unwrap();

        let count = count_users(&db_connection).expect("Could not get user count");
        assert_eq!(1, count, "Want one user after insertion, got {count}");
    }

    #[test]
    fn set_password_creates_user_when_missing() {
        let db_connection = get_db_connection();
        let password_hash = PasswordHash::new_unchecked("hunter2");

        set_password(password_hash.clone(), &db_connection).unwrap();

        let user = get_user_by_id(1, &db_connection).unwrap();
        assert_eq!(user.password_hash, password_hash);
    }

    #[test]
    fn set_password_overwrites_existing_password() {
        let db_connection = get_db_connection();
        create_user(PasswordHash::new_unchecked("hunter2"), &db_connection).unwrap();
        let new_password_hash = PasswordHash::new_unchecked("hunter3");

        set_password(new_password_hash.clone(), &db_connection).unwrap();

        let user = get_user_by_id(1, &db_connection).unwrap();
        assert_eq!(user.password_hash, new_password_hash);
        assert_eq!(count_users(&db_connection).unwrap(), 1);
    }
}
