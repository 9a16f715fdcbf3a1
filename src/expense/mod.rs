//! Expense management for the tracker.
//!
//! This module contains everything related to expense records:
//! - The `Expense` model and the `ExpenseData` request payload
//! - Database functions for storing, querying and deleting expenses
//! - The JSON endpoints for the five CRUD operations

mod core;
mod create_endpoint;
mod delete_endpoint;
mod get_endpoint;
mod list_endpoint;
mod update_endpoint;

pub use core::{Expense, ExpenseData, create_expense_table, map_expense_row};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use get_endpoint::get_expense_endpoint;
pub use list_endpoint::list_expenses_endpoint;
pub use update_endpoint::update_expense_endpoint;

#[cfg(test)]
pub use core::{count_expenses, create_expense, get_expense};
