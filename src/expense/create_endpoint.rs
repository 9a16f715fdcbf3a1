//! Defines the endpoint for creating a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{Expense, ExpenseData, core::create_expense},
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new expense.
///
/// Returns the created record including its storage-assigned ID. Malformed
/// payloads (e.g. a non-numeric amount) are rejected by the JSON extractor
/// before this handler runs.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Json(data): Json<ExpenseData>,
) -> Result<Json<Expense>, Error> {
    let connection = state.db_connection.lock().unwrap();

    create_expense(data, &connection).map(Json)
}
