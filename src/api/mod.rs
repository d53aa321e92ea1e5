//! Host-facing components: model loading, store synchronization, message
//! intake and export.

mod bridge_config;
mod engine;
mod export;
mod input_validation;
mod message_receiver;
mod model_loader;
mod sync_bridge;
mod view;

pub use bridge_config::BridgeConfig;
pub use engine::{ChartEngine, INPUT_KEY, StoreEngine};
pub use export::{
    ChartExporter, Downloader, ExportArtifact, ExportFormat, ExportOptions, ExportOutcome,
    ExportTarget, MemoryDownloader, Rasterizer, StaticDocument, SvgElement, file_stem,
    standalone_svg,
};
pub use input_validation::{MAX_SERIES, validate_input};
pub use message_receiver::{MessageReceiver, OriginPolicy, extract_model};
pub use model_loader::{
    ChartStateCache, LoadedModel, ModelLoader, ModelOverrides, parse_chart_model,
};
pub use sync_bridge::{BridgeState, HostInit, LifecyclePhase, SyncBridge};
pub use view::{ChartView, ExportControls, RendererProps};
