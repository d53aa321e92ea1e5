use chrono::{Datelike, NaiveDateTime, Timelike};
use serde_json::{Map, Value, json};

use super::date_ticks::{TimestampTicks, timestamp_ticks};
use super::tick_format::python_format_to_d3_tick_format;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v4.json";

const FONT: &str = "Nunito Sans, Helvetica, sans-serif";

/// Non-missing X values, in row order.
#[derive(Debug, Clone, PartialEq)]
pub enum XValues {
    Number(Vec<f64>),
    Text(Vec<String>),
    Timestamp(Vec<NaiveDateTime>),
}

impl XValues {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Number(values) => values.len(),
            Self::Text(values) => values.len(),
            Self::Timestamp(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn has_two_distinct(&self) -> bool {
        fn differs<T: PartialEq>(values: &[T]) -> bool {
            values
                .split_first()
                .is_some_and(|(first, rest)| rest.iter().any(|v| v != first))
        }
        match self {
            Self::Number(values) => differs(values),
            Self::Text(values) => differs(values),
            Self::Timestamp(values) => differs(values),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct XSeries {
    pub name: String,
    pub values: XValues,
    pub format: String,
}

impl XSeries {
    #[must_use]
    pub fn vega_data_type(&self) -> &'static str {
        match self.values {
            XValues::Number(_) => "quantitative",
            XValues::Text(_) => "ordinal",
            XValues::Timestamp(_) => "temporal",
        }
    }

    /// Only number columns carry a tick format.
    #[must_use]
    pub fn d3_tick_format(&self) -> Option<String> {
        match self.values {
            XValues::Number(_) => Some(python_format_to_d3_tick_format(&self.format)),
            _ => None,
        }
    }

    /// Values as JSON; timestamps become ISO-8601 UTC strings.
    #[must_use]
    pub fn json_values(&self) -> Vec<Value> {
        match &self.values {
            XValues::Number(values) => values.iter().copied().map(number_value).collect(),
            XValues::Text(values) => values.iter().cloned().map(Value::String).collect(),
            XValues::Timestamp(values) => values
                .iter()
                .map(|value| Value::String(utc_iso(value)))
                .collect(),
        }
    }

    #[must_use]
    pub fn timestamp_ticks(&self) -> Option<TimestampTicks> {
        match &self.values {
            XValues::Timestamp(values) => timestamp_ticks(values),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YSeries {
    pub name: String,
    pub color: String,
    /// Aligned with the X series; `None` is a gap.
    pub values: Vec<Option<f64>>,
    /// Python format string of the source column.
    pub tick_format: String,
}

impl YSeries {
    #[must_use]
    pub fn d3_tick_format(&self) -> String {
        python_format_to_d3_tick_format(&self.tick_format)
    }
}

/// Fully checked line chart, ready to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_axis_label: String,
    pub x_axis_tick_format: Option<String>,
    pub y_axis_label: String,
    pub x_series: XSeries,
    pub y_series: Vec<YSeries>,
    pub y_axis_tick_format: String,
}

impl LineChart {
    /// Long-format records `{x, line, y}`, one per plotted point.
    ///
    /// Records are grouped by series in series order; gaps are omitted.
    #[must_use]
    pub fn to_vega_data_values(&self) -> Vec<Value> {
        let xs = self.x_series.json_values();
        let mut records = Vec::new();
        for series in &self.y_series {
            for (x, y) in xs.iter().zip(&series.values) {
                let Some(y) = y else {
                    continue;
                };
                records.push(json!({
                    "x": x,
                    "line": series.name,
                    "y": number_value(*y),
                }));
            }
        }
        records
    }

    #[must_use]
    pub fn to_vega_x_encoding(&self) -> Value {
        let mut axis = Map::new();
        axis.insert("title".to_owned(), json!(self.x_axis_label));
        let mut encoding = Map::new();
        encoding.insert("field".to_owned(), json!("x"));
        encoding.insert("type".to_owned(), json!(self.x_series.vega_data_type()));

        match &self.x_series.values {
            XValues::Number(_) => {
                if let Some(format) = &self.x_axis_tick_format {
                    axis.insert("format".to_owned(), json!(format));
                    if format.ends_with('d') {
                        axis.insert("tickMinStep".to_owned(), json!(1));
                    }
                }
            }
            XValues::Text(_) => {
                axis.insert("labelAngle".to_owned(), json!(0));
                axis.insert("labelOverlap".to_owned(), json!(false));
                encoding.insert("sort".to_owned(), Value::Null);
            }
            XValues::Timestamp(_) => {
                if let Some(TimestampTicks { ticks, format }) = self.x_series.timestamp_ticks() {
                    let values: Vec<Value> = ticks
                        .iter()
                        .map(|tick| json!(tick.format("%Y-%m-%d").to_string()))
                        .collect();
                    axis.insert("values".to_owned(), Value::Array(values));
                    axis.insert(
                        "labelExpr".to_owned(),
                        json!(format!("utcFormat(datum.value, \"{format}\")")),
                    );
                    axis.insert("labelOverlap".to_owned(), json!("parity"));
                    axis.insert("labelSeparation".to_owned(), json!(5));
                    if let Some(first) = ticks.first() {
                        encoding.insert(
                            "scale".to_owned(),
                            json!({
                                "domainMin": {
                                    "expr": format!(
                                        "utc({}, {}, {})",
                                        first.year(),
                                        first.month0(),
                                        first.day()
                                    )
                                }
                            }),
                        );
                    }
                }
            }
        }

        encoding.insert("axis".to_owned(), Value::Object(axis));
        Value::Object(encoding)
    }

    /// Builds the Vega-Lite line chart specification.
    #[must_use]
    pub fn to_vega(&self) -> Value {
        let mut y_axis = json!({
            "title": self.y_axis_label,
            "format": self.y_axis_tick_format,
        });
        if self.y_axis_tick_format.ends_with('d') {
            y_axis["tickMinStep"] = json!(1);
        }

        let domain: Vec<&str> = self.y_series.iter().map(|y| y.name.as_str()).collect();
        let range: Vec<&str> = self.y_series.iter().map(|y| y.color.as_str()).collect();

        let mut spec = json!({
            "$schema": VEGA_LITE_SCHEMA,
            "title": self.title,
            "config": {
                "title": {
                    "offset": 15,
                    "color": "#383838",
                    "font": FONT,
                    "fontSize": 20,
                    "fontWeight": "normal",
                },
                "axis": {
                    "tickSize": 3,
                    "titlePadding": 20,
                    "titleFontSize": 15,
                    "titleFontWeight": 100,
                    "titleColor": "#686768",
                    "titleFont": FONT,
                    "labelFont": FONT,
                    "labelFontWeight": 400,
                    "labelColor": "#383838",
                    "labelFontSize": 12,
                    "labelPadding": 10,
                    "gridOpacity": 0.5,
                },
            },
            "data": { "values": self.to_vega_data_values() },
            "mark": {
                "type": "line",
                "point": { "shape": "circle", "size": 36 },
            },
            "encoding": {
                "x": self.to_vega_x_encoding(),
                "y": {
                    "field": "y",
                    "type": "quantitative",
                    "axis": y_axis,
                },
                "color": {
                    "field": "line",
                    "type": "nominal",
                    "scale": { "domain": domain, "range": range },
                },
            },
        });

        if self.y_series.len() == 1 {
            spec["encoding"]["color"]["legend"] = Value::Null;
        } else {
            spec["encoding"]["color"]["legend"] = json!({ "title": null });
            spec["config"]["legend"] = json!({
                "symbolType": "circle",
                "titlePadding": 20,
                "padding": 15,
                "offset": 0,
                "labelFontSize": 12,
                "rowPadding": 10,
                "labelFont": FONT,
                "labelColor": "#383838",
                "labelFontWeight": "normal",
            });
        }
        spec
    }
}

/// Integral values serialize as JSON integers, everything else as floats.
pub(crate) fn number_value(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

fn utc_iso(value: &NaiveDateTime) -> String {
    if value.nanosecond() == 0 {
        format!("{}Z", value.format("%Y-%m-%dT%H:%M:%S"))
    } else {
        format!("{}Z", value.format("%Y-%m-%dT%H:%M:%S%.6f"))
    }
}
