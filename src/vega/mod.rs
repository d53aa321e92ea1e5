//! Vega-Lite line-chart builder.
//!
//! Turns a typed [`Table`] and saved [`LineChartParams`] into a line chart
//! specification. Problems the user can fix (no column chosen, a column with
//! a single value, ...) come back as a [`ChartProblem`] alongside a
//! placeholder spec instead of failing the render.

mod chart;
mod date_ticks;
mod form;
mod params;
mod problem;
mod table;
mod tick_format;

pub use chart::{LineChart, VEGA_LITE_SCHEMA, XSeries, XValues, YSeries};
pub use date_ticks::{
    DatePeriod, MAX_SPECIAL_CASE_TICKS, TimestampTicks, nice_date_ticks, timestamp_ticks,
};
pub use form::{LineChartForm, MAX_AXIS_LABELS};
pub use params::{LineChartParams, YColumn, migrate_params};
pub use problem::ChartProblem;
pub use table::{Column, ColumnType, ColumnValues, DEFAULT_NUMBER_FORMAT, Table};
pub use tick_format::python_format_to_d3_tick_format;

use serde_json::{Value, json};
use tracing::debug;

use crate::error::BridgeResult;

/// Placeholder spec shown while a [`ChartProblem`] is outstanding.
pub const PROBLEM_PLACEHOLDER_TEXT: &str =
    "Please correct the error in this step's data or parameters";

/// Result of rendering a line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartRender {
    pub problem: Option<ChartProblem>,
    pub vega: Value,
}

/// Builds the Vega-Lite spec for `table` from saved `params`.
///
/// Params that do not decode are an error; problems with the chosen columns
/// are reported in [`LineChartRender::problem`].
pub fn render_line_chart(table: &Table, params: Value) -> BridgeResult<LineChartRender> {
    let form = LineChartForm::from(LineChartParams::from_json(params)?);
    match form.make_chart(table) {
        Ok(chart) => Ok(LineChartRender {
            problem: None,
            vega: chart.to_vega(),
        }),
        Err(problem) => {
            debug!(id = problem.id, "line chart problem");
            Ok(LineChartRender {
                problem: Some(problem),
                vega: json!({ "error": PROBLEM_PLACEHOLDER_TEXT }),
            })
        }
    }
}
