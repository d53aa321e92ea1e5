use std::borrow::Cow;

use indexmap::IndexMap;
use serde_json::Value;

use super::model::InputData;

/// One input row: column name to cell value, in column order.
pub type Row = IndexMap<String, Value>;

/// Row key carrying the host's positional index. Never emitted as a column.
pub const RESERVED_INDEX_KEY: &str = "index";

/// Converts rows into comma-delimited text with a header line.
///
/// Columns follow the key order of the first row, minus [`RESERVED_INDEX_KEY`].
/// Every line, the header included, is newline-terminated. Cells are written
/// verbatim: embedded commas, quotes and newlines are not escaped, so values
/// must already be delimiter-safe.
#[must_use]
pub fn rows_to_csv(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let columns: Vec<&str> = first
        .keys()
        .map(String::as_str)
        .filter(|key| *key != RESERVED_INDEX_KEY)
        .collect();

    let mut text = columns.join(",");
    text.push('\n');
    for row in rows {
        let cells: Vec<Cow<'_, str>> = columns
            .iter()
            .map(|column| cell_text(row.get(*column)))
            .collect();
        text.push_str(&cells.join(","));
        text.push('\n');
    }
    text
}

/// Wraps [`rows_to_csv`] output as engine input.
#[must_use]
pub fn rows_to_input(rows: &[Row]) -> InputData {
    InputData::from_raw(rows_to_csv(rows))
}

fn cell_text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(text)) => Cow::Borrowed(text.as_str()),
        Some(Value::Bool(flag)) => Cow::Borrowed(if *flag { "true" } else { "false" }),
        Some(Value::Number(number)) => match number.as_f64() {
            // Integral floats print without a trailing `.0`.
            Some(v) if number.is_f64() && v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                Cow::Owned(format!("{}", v as i64))
            }
            _ => Cow::Owned(number.to_string()),
        },
        Some(other) => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::cell_text;

    #[test]
    fn integral_floats_drop_fraction() {
        assert_eq!(cell_text(Some(&json!(3.0))), "3");
        assert_eq!(cell_text(Some(&json!(-12.0))), "-12");
        assert_eq!(cell_text(Some(&json!(2.5))), "2.5");
        assert_eq!(cell_text(Some(&json!(7))), "7");
    }

    #[test]
    fn null_and_missing_cells_are_empty() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&json!(null))), "");
    }
}
