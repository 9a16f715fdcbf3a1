//! Defines the endpoint for the yearly expense total line chart.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::Response,
};
use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisType, Symbol},
    series::Line,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    chart::{
        aggregation::{MonthlyTotal, month_labels, monthly_totals},
        png_response, render_png,
    },
};

/// The state needed to chart expense totals.
#[derive(Debug, Clone)]
pub struct YearlyExpenseChartState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for YearlyExpenseChartState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that renders the total expenses per month of `year` as a
/// PNG line chart.
///
/// The x-axis only shows months that have at least one expense. A year with
/// no expenses produces an empty chart, not an error. The chart is
/// recomputed from storage on every request.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn yearly_expense_line_endpoint(
    State(state): State<YearlyExpenseChartState>,
    Path(year): Path<i32>,
) -> Result<Response, Error> {
    let totals = {
        let connection = state.db_connection.lock().unwrap();
        monthly_totals(year, &connection)?
    };

    let chart = monthly_expense_chart(year, &totals);
    let image = render_png(&chart)?;

    Ok(png_response(image))
}

fn monthly_expense_chart(year: i32, totals: &[MonthlyTotal]) -> Chart {
    let months: Vec<u8> = totals.iter().map(|total| total.month).collect();
    let labels = month_labels(&months);
    let values: Vec<f64> = totals.iter().map(|total| total.total).collect();

    Chart::new()
        .title(Title::new().text(format!("Monthly Expenses for {year}")))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).name("Month").data(labels))
        .y_axis(Axis::new().type_(AxisType::Value).name("Total Expense ($)"))
        .series(Line::new().name("Total").symbol(Symbol::Circle).data(values))
}
