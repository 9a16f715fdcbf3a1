//! Defines the core data model and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::ExpenseId};

// ============================================================================
// MODELS
// ============================================================================

/// A single expense: an event where money was spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The amount of money spent in dollars.
    pub amount: f64,
    /// A free-text label grouping related expenses, e.g. "food".
    pub category: String,
    /// The calendar date the expense occurred on.
    pub date: Date,
    /// A text description of what the money was spent on.
    pub description: String,
}

/// The client-supplied fields of an expense.
///
/// Used as the request payload both for creating an expense and for updating
/// one. Updates replace every field except the ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseData {
    /// The amount of money spent in dollars.
    pub amount: f64,
    /// A free-text label grouping related expenses, e.g. "food".
    pub category: String,
    /// The calendar date the expense occurred on.
    pub date: Date,
    /// A text description of what the money was spent on.
    pub description: String,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_expense(data: ExpenseData, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expenses (amount, category, date, description)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, category, date, description",
        )?
        .query_one(
            (data.amount, &data.category, data.date, &data.description),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, amount, category, date, description FROM expenses WHERE id = :id")?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Retrieve a window of expenses ordered by date, newest first.
///
/// `skip` rows are skipped over and at most `limit` rows are returned. The
/// order of expenses sharing a date is unspecified.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn list_expenses(
    skip: u64,
    limit: u64,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let skip = skip as i64;
    let limit = limit as i64;

    connection
        .prepare(
            "SELECT id, amount, category, date, description FROM expenses
             ORDER BY date DESC
             LIMIT :limit OFFSET :skip",
        )?
        .query_map(&[(":limit", &limit), (":skip", &skip)], map_expense_row)?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

/// Overwrite every field of the expense `id` with `data` and return the
/// updated record.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    data: ExpenseData,
    connection: &Connection,
) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "UPDATE expenses
             SET amount = ?1, category = ?2, date = ?3, description = ?4
             WHERE id = ?5
             RETURNING id, amount, category, date, description",
        )?
        .query_one(
            (data.amount, &data.category, data.date, &data.description, id),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Remove the expense `id` from the database and return its last known state.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "DELETE FROM expenses WHERE id = :id
             RETURNING id, amount, category, date, description",
        )?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expenses;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expenses', 0)",
        (),
    )?;

    // Index used by the list endpoint and the chart aggregation queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let date = row.get(3)?;
    let description = row.get(4)?;

    Ok(Expense {
        id,
        amount,
        category,
        date,
        description,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        expense::core::{
            Expense, ExpenseData, count_expenses, create_expense, delete_expense, get_expense,
            list_expenses, update_expense,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn lunch_expense() -> ExpenseData {
        ExpenseData {
            amount: 50.0,
            category: "food".to_owned(),
            date: date!(2024 - 03 - 05),
            description: "lunch".to_owned(),
        }
    }

    #[test]
    fn create_assigns_id_starting_at_one() {
        let conn = get_test_connection();

        let expense = create_expense(lunch_expense(), &conn).unwrap();

        assert_eq!(
            expense,
            Expense {
                id: 1,
                amount: 50.0,
                category: "food".to_owned(),
                date: date!(2024 - 03 - 05),
                description: "lunch".to_owned(),
            }
        );
    }

    #[test]
    fn create_then_get_round_trips() {
        let conn = get_test_connection();
        let created = create_expense(lunch_expense(), &conn).unwrap();

        let fetched = get_expense(created.id, &conn).unwrap();

        assert_eq!(created, fetched);
    }

    #[test]
    fn get_fails_on_invalid_id() {
        let conn = get_test_connection();

        let result = get_expense(1337, &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn list_orders_by_date_descending() {
        let conn = get_test_connection();
        for (amount, date) in [
            (1.0, date!(2024 - 01 - 15)),
            (2.0, date!(2024 - 03 - 10)),
            (3.0, date!(2024 - 02 - 20)),
        ] {
            create_expense(
                ExpenseData {
                    amount,
                    category: "misc".to_owned(),
                    date,
                    description: String::new(),
                },
                &conn,
            )
            .unwrap();
        }

        let expenses = list_expenses(0, 100, &conn).unwrap();

        let dates: Vec<_> = expenses.iter().map(|expense| expense.date).collect();
        assert_eq!(
            dates,
            vec![
                date!(2024 - 03 - 10),
                date!(2024 - 02 - 20),
                date!(2024 - 01 - 15)
            ]
        );
    }

    #[test]
    fn list_windows_with_skip_and_limit() {
        let conn = get_test_connection();
        for day in 1..=10 {
            create_expense(
                ExpenseData {
                    amount: day as f64,
                    category: "misc".to_owned(),
                    date: date!(2024 - 01 - 01).replace_day(day).unwrap(),
                    description: String::new(),
                },
                &conn,
            )
            .unwrap();
        }

        let expenses = list_expenses(2, 3, &conn).unwrap();

        assert_eq!(expenses.len(), 3);
        // Newest first, so skipping 2 lands on January 8th.
        assert_eq!(expenses[0].date, date!(2024 - 01 - 08));
        assert_eq!(expenses[2].date, date!(2024 - 01 - 06));
    }

    #[test]
    fn update_replaces_every_field() {
        let conn = get_test_connection();
        let created = create_expense(lunch_expense(), &conn).unwrap();

        let updated = update_expense(
            created.id,
            ExpenseData {
                amount: 75.0,
                category: "dining".to_owned(),
                date: date!(2024 - 03 - 06),
                description: "dinner".to_owned(),
            },
            &conn,
        )
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount, 75.0);
        assert_eq!(updated.category, "dining");
        assert_eq!(updated.date, date!(2024 - 03 - 06));
        assert_eq!(updated.description, "dinner");
        assert_eq!(get_expense(created.id, &conn).unwrap(), updated);
    }

    #[test]
    fn update_fails_on_invalid_id_and_creates_no_row() {
        let conn = get_test_connection();

        let result = update_expense(42, lunch_expense(), &conn);

        assert_eq!(result, Err(Error::NotFound));
        assert_eq!(count_expenses(&conn).unwrap(), 0);
    }

    #[test]
    fn delete_returns_last_known_state() {
        let conn = get_test_connection();
        let created = create_expense(lunch_expense(), &conn).unwrap();

        let deleted = delete_expense(created.id, &conn).unwrap();

        assert_eq!(deleted, created);
        assert_eq!(get_expense(created.id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_twice_fails_on_second_attempt() {
        let conn = get_test_connection();
        let created = create_expense(lunch_expense(), &conn).unwrap();

        delete_expense(created.id, &conn).unwrap();
        let second_attempt = delete_expense(created.id, &conn);

        assert_eq!(second_attempt, Err(Error::NotFound));
    }
}
