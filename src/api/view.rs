use serde::{Deserialize, Serialize};

use crate::core::{ChartModel, Metadata};
use crate::observe::ChartSnapshot;

use super::BridgeConfig;

/// Props for the export dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportControls {
    pub svg_wrapper_class_name: String,
    pub enable_json_export: bool,
    pub metadata: Metadata,
}

/// Props for the engine's renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererProps {
    pub editable: bool,
    pub show_metadata: bool,
    pub responsive: bool,
    pub class_name: String,
    pub svg_class_name: String,
}

/// Everything the host needs to draw the chart and its export controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub export: ExportControls,
    pub renderer: RendererProps,
    pub model: ChartModel,
}

impl ChartView {
    #[must_use]
    pub fn from_snapshot(config: &BridgeConfig, snapshot: &ChartSnapshot) -> Self {
        Self {
            export: ExportControls {
                svg_wrapper_class_name: config.svg_wrapper_class_name.clone(),
                enable_json_export: config.export.enable_json_export,
                metadata: snapshot.metadata.clone(),
            },
            renderer: RendererProps {
                editable: false,
                show_metadata: true,
                responsive: true,
                class_name: config.svg_wrapper_class_name.clone(),
                svg_class_name: config.svg_class_name.clone(),
            },
            model: snapshot.to_model(),
        }
    }
}
