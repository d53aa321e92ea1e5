use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ChartFamily, ChartModel, InputData, SeriesType, default_model};
use crate::error::BridgeResult;

/// Overrides applied to a family's default model before it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOverrides {
    #[serde(default)]
    pub series_type: SeriesType,
    #[serde(default = "default_max_label_length")]
    pub max_label_length: u32,
}

impl Default for ModelOverrides {
    fn default() -> Self {
        Self {
            series_type: SeriesType::default(),
            max_label_length: default_max_label_length(),
        }
    }
}

fn default_max_label_length() -> u32 {
    7
}

/// A model ready to hand to the engine, plus the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub model: ChartModel,
    /// Persisted text the model was parsed from; `None` for defaults.
    pub source_text: Option<String>,
}

impl LoadedModel {
    #[must_use]
    pub fn from_defaults(&self) -> bool {
        self.source_text.is_none()
    }

    #[must_use]
    pub fn is_same_source(&self, text: &str) -> bool {
        self.source_text.as_deref() == Some(text)
    }
}

/// Parses persisted chart state or falls back to family defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelLoader {
    family: ChartFamily,
    overrides: ModelOverrides,
}

impl ModelLoader {
    #[must_use]
    pub fn new(family: ChartFamily, overrides: ModelOverrides) -> Self {
        Self { family, overrides }
    }

    #[must_use]
    pub fn family(&self) -> ChartFamily {
        self.family
    }

    #[must_use]
    pub fn overrides(&self) -> ModelOverrides {
        self.overrides
    }

    /// Loads the model for a mount.
    ///
    /// The returned model's input is always the blank placeholder, whatever
    /// the text or the defaults carried, so validation only runs against
    /// real rows. Malformed text is a [`crate::error::BridgeError::ConfigParse`].
    pub fn load(&self, text: &str) -> BridgeResult<LoadedModel> {
        let (mut model, source_text) = if text.is_empty() {
            debug!(family = self.family.as_str(), "load default chart model");
            (self.defaults(), None)
        } else {
            debug!(bytes = text.len(), "parse persisted chart model");
            (parse_chart_model(text)?, Some(text.to_owned()))
        };
        model.chart_props.input = InputData::blank();
        Ok(LoadedModel { model, source_text })
    }

    /// Fresh copy of the family defaults with overrides applied.
    #[must_use]
    pub fn defaults(&self) -> ChartModel {
        let mut model = default_model(self.family);
        apply_overrides(&mut model, self.overrides);
        model
    }
}

pub fn parse_chart_model(text: &str) -> BridgeResult<ChartModel> {
    ChartModel::from_json_str(text)
}

fn apply_overrides(model: &mut ChartModel, overrides: ModelOverrides) {
    if let Some(first) = model.chart_props.chart_settings.first_mut() {
        first.series_type = overrides.series_type.as_str().to_owned();
    }
    model.chart_props.scale.type_settings.max_length = Some(overrides.max_label_length);
}

/// Last persisted chart-state text, used to skip redundant saves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartStateCache {
    last: Option<String>,
}

impl ChartStateCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `text`. Returns `true` when it differs from the cached value.
    pub fn remember(&mut self, text: &str) -> bool {
        if self.last.as_deref() == Some(text) {
            return false;
        }
        self.last = Some(text.to_owned());
        true
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
