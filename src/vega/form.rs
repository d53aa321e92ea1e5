use chrono::NaiveDateTime;

use super::chart::{LineChart, XSeries, XValues, YSeries};
use super::params::{LineChartParams, YColumn};
use super::problem::ChartProblem;
use super::table::{ColumnType, ColumnValues, Table};

/// More text X values than this cannot be labelled legibly.
pub const MAX_AXIS_LABELS: usize = 300;

/// Parameters with valid types but unchecked values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineChartForm {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub x_column: String,
    pub y_columns: Vec<YColumn>,
}

impl From<LineChartParams> for LineChartForm {
    fn from(params: LineChartParams) -> Self {
        Self {
            title: params.title,
            x_axis_label: params.x_axis_label,
            y_axis_label: params.y_axis_label,
            x_column: params.x_column,
            y_columns: params.y_columns,
        }
    }
}

impl LineChartForm {
    /// Checks the form against `table` and builds a chart.
    ///
    /// Rows with a missing X value are dropped from every series; missing Y
    /// values are kept as gaps. Blank labels default to the column names.
    pub fn make_chart(&self, table: &Table) -> Result<LineChart, ChartProblem> {
        let (x_series, mask) = self.make_x_series(table)?;

        if self.y_columns.is_empty() {
            return Err(ChartProblem::new(
                "noYAxisError.message",
                "Please choose a Y-axis column",
            ));
        }

        let mut y_series = Vec::with_capacity(self.y_columns.len());
        for y_column in &self.y_columns {
            if y_column.column == self.x_column {
                return Err(ChartProblem::new(
                    "sameAxesError.message",
                    "You cannot plot Y-axis column {column_name} because it is the X-axis column",
                )
                .with_arg("column_name", &y_column.column));
            }

            let column = table
                .column(&y_column.column)
                .ok_or_else(|| missing_column(&y_column.column))?;
            let ColumnValues::Number(values) = &column.values else {
                return Err(ChartProblem::new(
                    "axisNotNumericError.message",
                    "Cannot plot Y-axis column \"{column_name}\" because it is not numeric. \
                     Convert it to a number before plotting it.",
                )
                .with_arg("column_name", &y_column.column));
            };

            let aligned: Vec<Option<f64>> = values
                .iter()
                .zip(&mask)
                .filter(|(_, keep)| **keep)
                .map(|(value, _)| value.filter(|v| !v.is_nan()))
                .collect();

            if aligned.iter().all(Option::is_none) {
                return Err(ChartProblem::new(
                    "emptyAxisError.message",
                    "Cannot plot Y-axis column \"{column_name}\" because it has no values",
                )
                .with_arg("column_name", &y_column.column));
            }

            y_series.push(YSeries {
                name: y_column.column.clone(),
                color: y_column.color.clone(),
                values: aligned,
                tick_format: column.format.clone(),
            });
        }

        let title = non_blank_or(&self.title, "Line Chart");
        let x_axis_label = non_blank_or(&self.x_axis_label, &x_series.name);
        let y_axis_label = non_blank_or(&self.y_axis_label, &y_series[0].name);
        let x_axis_tick_format = x_series.d3_tick_format();
        let y_axis_tick_format = y_series[0].d3_tick_format();

        Ok(LineChart {
            title,
            x_axis_label,
            x_axis_tick_format,
            y_axis_label,
            x_series,
            y_series,
            y_axis_tick_format,
        })
    }

    fn make_x_series(&self, table: &Table) -> Result<(XSeries, Vec<bool>), ChartProblem> {
        if self.x_column.is_empty() {
            return Err(ChartProblem::new(
                "noXAxisError.message",
                "Please choose an X-axis column",
            ));
        }
        let column = table
            .column(&self.x_column)
            .ok_or_else(|| missing_column(&self.x_column))?;

        let mask: Vec<bool> = (0..column.values.len())
            .map(|row| !column.values.is_missing(row))
            .collect();
        let values = match &column.values {
            ColumnValues::Number(values) => XValues::Number(present(values, &mask)),
            ColumnValues::Text(values) => XValues::Text(present(values, &mask)),
            ColumnValues::Timestamp(values) => {
                XValues::Timestamp(present::<NaiveDateTime>(values, &mask))
            }
        };
        let n_values = values.len();

        if column.column_type() == ColumnType::Text && n_values > MAX_AXIS_LABELS {
            return Err(ChartProblem::new(
                "tooManyTextValuesError.message",
                "Column \"{x_column}\" has {n_safe_x_values} text values. We cannot fit them all on the X axis. \
                 Please change the input table to have 10 or fewer rows, or convert \"{x_column}\" to number or date.",
            )
            .with_arg("x_column", &self.x_column)
            .with_arg("n_safe_x_values", n_values));
        }

        if n_values == 0 {
            return Err(ChartProblem::new(
                "noValuesError.message",
                "Column \"{column_name}\" has no values. Please select a column with data.",
            )
            .with_arg("column_name", &self.x_column));
        }

        if !values.has_two_distinct() {
            return Err(ChartProblem::new(
                "onlyOneValueError.message",
                "Column \"{column_name}\" has only 1 value. Please select a column with 2 or more values.",
            )
            .with_arg("column_name", &self.x_column));
        }

        Ok((
            XSeries {
                name: self.x_column.clone(),
                values,
                format: column.format.clone(),
            },
            mask,
        ))
    }
}

fn present<T: Clone>(values: &[Option<T>], mask: &[bool]) -> Vec<T> {
    values
        .iter()
        .zip(mask)
        .filter_map(|(value, keep)| if *keep { value.clone() } else { None })
        .collect()
}

fn missing_column(name: &str) -> ChartProblem {
    ChartProblem::new(
        "missingColumnError.message",
        "Column \"{column_name}\" does not exist in the input table",
    )
    .with_arg("column_name", name)
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}
