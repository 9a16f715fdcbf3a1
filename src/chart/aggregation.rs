//! Expense aggregation for the yearly charts.
//!
//! Provides database queries that group expenses by calendar month (and
//! category) within a year, plus helpers for formatting month labels. Month
//! and year numbers are extracted from the stored `YYYY-MM-DD` date text
//! server-side with SQLite's `strftime`, dates are naive calendar dates with
//! no timezone handling.

use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::Error;

/// Three-letter abbreviations for the twelve calendar months, in order.
pub(super) const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The total amount spent in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MonthlyTotal {
    /// Month number, 1 (January) through 12 (December).
    pub month: u8,
    /// The sum of expense amounts in the month.
    pub total: f64,
}

/// A category's expense totals across all twelve months of a year.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CategorySeries {
    /// The expense category the series belongs to.
    pub category: String,
    /// One entry per calendar month, zero where the category has no
    /// expenses. The explicit zeros keep each chart line unbroken across the
    /// full year.
    pub totals: [f64; 12],
}

/// Sum expense amounts per calendar month for `year`.
///
/// Only months with at least one expense appear in the result, in calendar
/// order. A year with no expenses yields an empty vector. `year` is not
/// validated, an implausible year simply matches no rows.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub(super) fn monthly_totals(
    year: i32,
    connection: &Connection,
) -> Result<Vec<MonthlyTotal>, Error> {
    connection
        .prepare(
            "SELECT CAST(strftime('%m', date) AS INTEGER) AS month, SUM(amount) AS total
             FROM expenses
             WHERE CAST(strftime('%Y', date) AS INTEGER) = :year
             GROUP BY month
             ORDER BY month",
        )?
        .query_map(&[(":year", &year)], |row| {
            Ok(MonthlyTotal {
                month: row.get(0)?,
                total: row.get(1)?,
            })
        })?
        .map(|total_result| total_result.map_err(Error::SqlError))
        .collect()
}

/// Sum expense amounts per (category, month) for `year` and zero-fill each
/// category across all twelve months.
///
/// Every category observed in the year gets a series with exactly 12 points.
/// Categories are returned in alphabetical order. A year with no expenses
/// yields an empty vector.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub(super) fn category_monthly_totals(
    year: i32,
    connection: &Connection,
) -> Result<Vec<CategorySeries>, Error> {
    let mut statement = connection.prepare(
        "SELECT category, CAST(strftime('%m', date) AS INTEGER) AS month, SUM(amount) AS total
         FROM expenses
         WHERE CAST(strftime('%Y', date) AS INTEGER) = :year
         GROUP BY category, month",
    )?;
    let rows = statement.query_map(&[(":year", &year)], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, u8>(1)?,
            row.get::<_, f64>(2)?,
        ))
    })?;

    let mut series: BTreeMap<String, [f64; 12]> = BTreeMap::new();

    for row in rows {
        let (category, month, total) = row?;
        series.entry(category).or_insert([0.0; 12])[usize::from(month - 1)] = total;
    }

    Ok(series
        .into_iter()
        .map(|(category, totals)| CategorySeries { category, totals })
        .collect())
}

/// Format month numbers (1 through 12) as three-letter abbreviations.
pub(super) fn month_labels(months: &[u8]) -> Vec<String> {
    months
        .iter()
        .map(|&month| MONTH_ABBREVIATIONS[usize::from(month - 1)].to_string())
        .collect()
}
