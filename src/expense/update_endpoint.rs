//! Defines the endpoint for updating an expense in place.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, ExpenseId,
    expense::{Expense, ExpenseData, core::update_expense},
};

/// The state needed to update an expense.
#[derive(Debug, Clone)]
pub struct UpdateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for updating an expense by its ID.
///
/// The payload is a full replacement: every field except the ID is
/// overwritten. Responds 404 if there is no expense with that ID, and no row
/// is created in that case.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn update_expense_endpoint(
    State(state): State<UpdateExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Json(data): Json<ExpenseData>,
) -> Result<Json<Expense>, Error> {
    let connection = state.db_connection.lock().unwrap();

    update_expense(expense_id, data, &connection).map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, State},
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        expense::{
            ExpenseData, count_expenses, create_expense, get_expense,
            update_endpoint::{UpdateExpenseState, update_expense_endpoint},
        },
    };

    fn get_test_state() -> UpdateExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        UpdateExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn lunch_expense() -> ExpenseData {
        ExpenseData {
            amount: 50.0,
            category: "food".to_owned(),
            date: date!(2024 - 03 - 05),
            description: "lunch".to_owned(),
        }
    }

    #[tokio::test]
    async fn overwrites_fields_and_returns_updated_record() {
        let state = get_test_state();
        let created = {
            let connection = state.db_connection.lock().unwrap();
            create_expense(lunch_expense(), &connection).unwrap()
        };

        let Json(updated) = update_expense_endpoint(
            State(state.clone()),
            Path(created.id),
            Json(ExpenseData {
                amount: 75.0,
                ..lunch_expense()
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount, 75.0);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_expense(created.id, &connection).unwrap(), updated);
    }

    #[tokio::test]
    async fn missing_expense_is_not_found_and_creates_no_row() {
        let state = get_test_state();

        let result =
            update_expense_endpoint(State(state.clone()), Path(42), Json(lunch_expense())).await;

        assert!(matches!(result, Err(Error::NotFound)));

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 0);
    }
}
