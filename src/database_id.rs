//! Aliases for database row IDs.

/// The ID of a row in the application database.
pub type DatabaseId = i64;

/// The ID of a row in the account table.
pub type AccountId = DatabaseId;

/// The ID of a row in the transaction table.
pub type TransactionId = DatabaseId;

/// The ID of a row in the user table.
pub type UserId = DatabaseId;
