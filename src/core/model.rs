use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};

/// Engine-schema fields this crate does not interpret.
///
/// Kept in insertion order so models survive a load/forward cycle unchanged.
pub type Extras = IndexMap<String, Value>;

/// Full structured configuration describing a chart's data, settings and metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartModel {
    pub chart_props: ChartProps,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub session: Session,
    #[serde(flatten)]
    pub extra: Extras,
}

impl ChartModel {
    /// Parses a persisted chart-state blob.
    pub fn from_json_str(input: &str) -> BridgeResult<Self> {
        serde_json::from_str(input).map_err(|e| BridgeError::ConfigParse(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> BridgeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BridgeError::InvalidData(format!("failed to serialize chart model: {e}")))
    }

    pub fn to_json_compact(&self) -> BridgeResult<String> {
        serde_json::to_string(self)
            .map_err(|e| BridgeError::InvalidData(format!("failed to serialize chart model: {e}")))
    }

    pub fn to_value(&self) -> BridgeResult<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| BridgeError::InvalidData(format!("failed to serialize chart model: {e}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartProps {
    #[serde(default)]
    pub input: InputData,
    #[serde(default)]
    pub chart_settings: Vec<ChartSetting>,
    #[serde(default)]
    pub scale: Scale,
    #[serde(flatten)]
    pub extra: Extras,
}

/// Delimited input text as handed to the chart engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputData {
    #[serde(default)]
    pub raw: String,
    #[serde(flatten)]
    pub extra: Extras,
}

impl InputData {
    /// Placeholder used until real rows arrive.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            extra: Extras::new(),
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// Per-series settings. `type` selects the series renderer (line, column, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSetting {
    #[serde(rename = "type", default)]
    pub series_type: String,
    #[serde(flatten)]
    pub extra: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scale {
    #[serde(default)]
    pub type_settings: TypeSettings,
    #[serde(flatten)]
    pub extra: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSettings {
    /// Maximum axis label length before the engine abbreviates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(flatten)]
    pub extra: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub chart_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub extra: Extras,
}

/// Engine session values (separators, em size, ...). Opaque to this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(flatten)]
    pub values: Extras,
}

/// Converts a `json!` object literal into an ordered extras map.
pub(crate) fn extras_from(value: Value) -> Extras {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => Extras::new(),
    }
}
