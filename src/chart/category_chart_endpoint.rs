//! Defines the endpoint for the yearly by-category line chart.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::Response,
};
use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisType, Orient, Symbol},
    series::Line,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    chart::{
        aggregation::{CategorySeries, MONTH_ABBREVIATIONS, category_monthly_totals},
        png_response, render_png,
    },
};

/// The state needed to chart expenses by category.
#[derive(Debug, Clone)]
pub struct YearlyCategoryChartState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for YearlyCategoryChartState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that renders monthly expense totals per category for
/// `year` as a PNG line chart, one line per category.
///
/// Unlike the overall monthly chart, the x-axis always shows all twelve
/// months and every category line spans the full year, with months lacking
/// data plotted as zero rather than omitted. The legend lists the categories
/// outside the plot area. A year with no expenses produces an empty chart.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn yearly_category_line_endpoint(
    State(state): State<YearlyCategoryChartState>,
    Path(year): Path<i32>,
) -> Result<Response, Error> {
    let series = {
        let connection = state.db_connection.lock().unwrap();
        category_monthly_totals(year, &connection)?
    };

    let chart = category_expense_chart(year, &series);
    let image = render_png(&chart)?;

    Ok(png_response(image))
}

fn category_expense_chart(year: i32, series: &[CategorySeries]) -> Chart {
    let labels: Vec<String> = MONTH_ABBREVIATIONS
        .iter()
        .map(|&label| label.to_string())
        .collect();

    let mut chart = Chart::new()
        .title(Title::new().text(format!("Monthly Expenses by Category for {year}")))
        .legend(Legend::new().orient(Orient::Vertical).right(10).top("middle"))
        .grid(
            Grid::new()
                .left("3%")
                .right("12%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).name("Month").data(labels))
        .y_axis(Axis::new().type_(AxisType::Value).name("Total Expense ($)"));

    for category_series in series {
        chart = chart.series(
            Line::new()
                .name(category_series.category.as_str())
                .symbol(Symbol::Circle)
                .data(category_series.totals.to_vec()),
        );
    }

    chart
}

#[cfg(test)]
mod tests {
    use crate::chart::{
        aggregation::CategorySeries, category_chart_endpoint::category_expense_chart,
    };

    #[test]
    fn chart_title_embeds_year() {
        let chart = category_expense_chart(2024, &[]);

        assert!(
            chart
                .to_string()
                .contains("Monthly Expenses by Category for 2024")
        );
    }

    #[test]
    fn x_axis_always_shows_all_twelve_months() {
        let options = category_expense_chart(2024, &[]).to_string();

        for label in ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"] {
            assert!(options.contains(label), "missing month label {label}");
        }
    }

    #[test]
    fn every_category_gets_a_line() {
        let mut food_totals = [0.0; 12];
        food_totals[2] = 25.0;
        let series = vec![
            CategorySeries {
                category: "food".to_owned(),
                totals: food_totals,
            },
            CategorySeries {
                category: "rent".to_owned(),
                totals: [100.0; 12],
            },
        ];

        let options = category_expense_chart(2024, &series).to_string();

        assert!(options.contains("food"));
        assert!(options.contains("rent"));
    }
}
