use serde::{Deserialize, Serialize};
use serde_json::json;

use super::model::{
    ChartModel, ChartProps, ChartSetting, InputData, Metadata, Scale, Session, TypeSettings,
    extras_from,
};

/// Chart families with built-in default configurations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFamily {
    #[default]
    Xy,
    Chartgrid,
}

impl ChartFamily {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xy => "xy",
            Self::Chartgrid => "chartgrid",
        }
    }
}

/// Series renderer selected for the first chart setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    #[default]
    Line,
    Column,
    Scatter,
    Area,
}

impl SeriesType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Column => "column",
            Self::Scatter => "scatter",
            Self::Area => "area",
        }
    }
}

const SAMPLE_XY_INPUT: &str = "date,Apples,Oranges\n\
2000-01-01,1.4,2.1\n\
2001-01-01,2.8,2.3\n\
2002-01-01,3.1,3.9\n";

const SAMPLE_GRID_INPUT: &str = "name,Apples,Oranges\n\
North,12,8\n\
South,7,15\n";

/// Builds a fresh default model for `family`.
///
/// Every call returns an independent value, including the engine's sample
/// input data.
#[must_use]
pub fn default_model(family: ChartFamily) -> ChartModel {
    match family {
        ChartFamily::Xy => xy_defaults(),
        ChartFamily::Chartgrid => chartgrid_defaults(),
    }
}

fn xy_defaults() -> ChartModel {
    ChartModel {
        chart_props: ChartProps {
            input: sample_input(SAMPLE_XY_INPUT),
            chart_settings: vec![ChartSetting {
                series_type: SeriesType::Line.as_str().to_owned(),
                extra: extras_from(json!({ "colorIndex": 0, "altAxis": false })),
            }],
            scale: Scale {
                type_settings: TypeSettings {
                    max_length: Some(4),
                    extra: extras_from(json!({ "precision": 0 })),
                },
                extra: extras_from(json!({
                    "primaryScale": { "ticks": 5, "precision": 0, "prefix": "", "suffix": "" },
                    "dateSettings": { "dateFrequency": "auto", "dateFormat": "auto", "inputTZ": null },
                    "numericSettings": { "ticks": null, "precision": 0, "prefix": "", "suffix": "" }
                })),
            },
            extra: extras_from(json!({ "extraPadding": { "top": 0, "right": 0, "bottom": 0, "left": 0 } })),
        },
        metadata: default_metadata(ChartFamily::Xy),
        session: Session::default(),
        extra: Default::default(),
    }
}

fn chartgrid_defaults() -> ChartModel {
    ChartModel {
        chart_props: ChartProps {
            input: sample_input(SAMPLE_GRID_INPUT),
            chart_settings: vec![ChartSetting {
                series_type: SeriesType::Column.as_str().to_owned(),
                extra: extras_from(json!({ "colorIndex": 0 })),
            }],
            scale: Scale {
                type_settings: TypeSettings {
                    max_length: Some(4),
                    extra: Default::default(),
                },
                extra: extras_from(json!({
                    "primaryScale": { "ticks": 5, "precision": 0, "prefix": "", "suffix": "" }
                })),
            },
            extra: extras_from(json!({ "_grid": { "rows": 1, "cols": 1, "type": "column" } })),
        },
        metadata: default_metadata(ChartFamily::Chartgrid),
        session: Session::default(),
        extra: Default::default(),
    }
}

fn default_metadata(family: ChartFamily) -> Metadata {
    Metadata {
        chart_type: family.as_str().to_owned(),
        title: String::new(),
        extra: extras_from(json!({ "size": "auto", "source": "", "credit": "" })),
    }
}

fn sample_input(raw: &str) -> InputData {
    let mut input = InputData::from_raw(raw);
    input.extra = extras_from(json!({ "status": "VALID", "valid": true }));
    input
}
