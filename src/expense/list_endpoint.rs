//! Defines the endpoint for listing expenses, newest date first.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    expense::{Expense, core::list_expenses},
};

/// The state needed to list expenses.
#[derive(Debug, Clone)]
pub struct ListExpensesState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for listing expenses.
#[derive(Debug, Deserialize)]
pub struct ListExpensesParams {
    /// How many rows to skip over before the returned window. Defaults to 0.
    #[serde(default)]
    pub skip: u64,
    /// The maximum number of rows to return. Defaults to 100.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    100
}

/// A route handler for listing expenses ordered by date descending.
///
/// The response contains no total count, clients paginate by probing with
/// `skip` until a short page comes back.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn list_expenses_endpoint(
    State(state): State<ListExpensesState>,
    Query(params): Query<ListExpensesParams>,
) -> Result<Json<Vec<Expense>>, Error> {
    let connection = state.db_connection.lock().unwrap();

    list_expenses(params.skip, params.limit, &connection).map(Json)
}
