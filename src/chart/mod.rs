//! Yearly expense charts.
//!
//! This module contains everything related to the chart endpoints:
//! - Aggregation queries that group expenses by month (and category)
//! - Chart construction and server-side PNG rendering

mod aggregation;
mod category_chart_endpoint;
mod monthly_chart_endpoint;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use charming::{Chart, ImageFormat, ImageRenderer};

use crate::Error;

pub use category_chart_endpoint::yearly_category_line_endpoint;
pub use monthly_chart_endpoint::yearly_expense_line_endpoint;

/// Chart image dimensions in pixels.
const CHART_WIDTH: u32 = 1200;
const CHART_HEIGHT: u32 = 600;

/// Render `chart` to PNG bytes.
///
/// Rendering is synchronous and happens on every request, chart images are
/// never cached.
fn render_png(chart: &Chart) -> Result<Vec<u8>, Error> {
    let mut renderer = ImageRenderer::new(CHART_WIDTH, CHART_HEIGHT);

    renderer
        .render_format(ImageFormat::Png, chart)
        .map_err(|error| Error::ChartRender(format!("{error:?}")))
}

/// Wrap PNG bytes in a response with the image content type.
fn png_response(image: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], image).into_response()
}
