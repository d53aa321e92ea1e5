use serde::{Deserialize, Serialize};

use crate::core::ChartFamily;
use crate::error::{BridgeError, BridgeResult};

use super::{ExportOptions, ModelOverrides, OriginPolicy};

/// Public bridge configuration.
///
/// Serializable so hosts can ship it alongside the persisted chart state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    #[serde(default)]
    pub family: ChartFamily,
    #[serde(default)]
    pub overrides: ModelOverrides,
    /// Class of the element wrapping the rendered SVG; exports look it up.
    #[serde(default = "default_svg_wrapper_class_name")]
    pub svg_wrapper_class_name: String,
    #[serde(default = "default_svg_class_name")]
    pub svg_class_name: String,
    #[serde(default)]
    pub export: ExportOptions,
    #[serde(default)]
    pub origin_policy: OriginPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            family: ChartFamily::default(),
            overrides: ModelOverrides::default(),
            svg_wrapper_class_name: default_svg_wrapper_class_name(),
            svg_class_name: default_svg_class_name(),
            export: ExportOptions::default(),
            origin_policy: OriginPolicy::default(),
        }
    }
}

impl BridgeConfig {
    #[must_use]
    pub fn new(family: ChartFamily) -> Self {
        Self {
            family,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: ModelOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    #[must_use]
    pub fn with_svg_wrapper_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.svg_wrapper_class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn with_export_options(mut self, export: ExportOptions) -> Self {
        self.export = export;
        self
    }

    #[must_use]
    pub fn with_origin_policy(mut self, policy: OriginPolicy) -> Self {
        self.origin_policy = policy;
        self
    }

    pub fn validate(&self) -> BridgeResult<()> {
        if self.svg_wrapper_class_name.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "svg wrapper class name must not be empty".to_owned(),
            ));
        }
        if self.svg_class_name.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "svg class name must not be empty".to_owned(),
            ));
        }
        if self.overrides.max_label_length == 0 {
            return Err(BridgeError::InvalidConfig(
                "max label length must be > 0".to_owned(),
            ));
        }
        if let OriginPolicy::AllowList(origins) = &self.origin_policy {
            if origins.is_empty() {
                return Err(BridgeError::InvalidConfig(
                    "origin allow list must not be empty".to_owned(),
                ));
            }
        }
        if self.export.fallback_file_stem.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "fallback export file stem must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> BridgeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            BridgeError::InvalidConfig(format!("failed to serialize bridge config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> BridgeResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            BridgeError::InvalidConfig(format!("failed to parse bridge config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn default_svg_wrapper_class_name() -> String {
    "render-svg-mobile".to_owned()
}

fn default_svg_class_name() -> String {
    "rendered-svg-class-name".to_owned()
}
