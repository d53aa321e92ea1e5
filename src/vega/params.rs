use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YColumn {
    pub column: String,
    pub color: String,
}

impl YColumn {
    #[must_use]
    pub fn new(column: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            color: color.into(),
        }
    }
}

/// User-chosen line-chart parameters, current schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChartParams {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub x_axis_label: String,
    #[serde(default)]
    pub y_axis_label: String,
    #[serde(default)]
    pub x_column: String,
    #[serde(default)]
    pub y_columns: Vec<YColumn>,
}

impl LineChartParams {
    /// Parses parameters saved under any schema version.
    pub fn from_json(params: Value) -> BridgeResult<Self> {
        let params = migrate_params(params)?;
        serde_json::from_value(params)
            .map_err(|e| BridgeError::InvalidData(format!("invalid line chart params: {e}")))
    }
}

/// Upgrades saved parameters to the current schema.
///
/// - drops the obsolete `x_data_type` entry;
/// - decodes `y_columns` stored as a JSON string (empty string means none).
pub fn migrate_params(params: Value) -> BridgeResult<Value> {
    let Value::Object(mut params) = params else {
        return Err(BridgeError::InvalidData(
            "line chart params must be a JSON object".to_owned(),
        ));
    };
    params.remove("x_data_type");

    if let Some(Value::String(encoded)) = params.get("y_columns") {
        let decoded = if encoded.is_empty() {
            Value::Array(Vec::new())
        } else {
            serde_json::from_str(encoded).map_err(|e| {
                BridgeError::InvalidData(format!("y_columns is not valid JSON: {e}"))
            })?
        };
        params.insert("y_columns".to_owned(), decoded);
    }
    Ok(Value::Object(params))
}
