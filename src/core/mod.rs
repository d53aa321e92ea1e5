pub mod csv_adapter;
pub mod defaults;
pub mod error_kinds;
pub mod model;

pub use csv_adapter::{RESERVED_INDEX_KEY, Row, rows_to_csv, rows_to_input};
pub use defaults::{ChartFamily, SeriesType, default_model};
pub use error_kinds::{ErrorKind, ErrorLocation, ErrorMessage, ErrorSet, ErrorSeverity};
pub use model::{
    ChartModel, ChartProps, ChartSetting, Extras, InputData, Metadata, Scale, Session,
    TypeSettings,
};
