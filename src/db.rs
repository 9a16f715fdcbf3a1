//! Database initialization for the application.

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// Create the application tables if they do not already exist.
///
/// This function is idempotent and safe to run on every startup, existing
/// rows are left untouched.
///
/// # Errors
/// Returns an error if the schema cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_expense_table(connection)?;

    Ok(())
}
