//! chart-embed: host-side glue for an embedded chart editor.
//!
//! The crate keeps a host page and an external chart engine in step:
//! persisted chart state and host rows go in through [`api::SyncBridge`],
//! engine state comes back through the observable stores in [`observe`],
//! and the rendered chart leaves through the export actions in [`api`].
//! [`vega`] builds Vega-Lite line charts from typed tables.

pub mod api;
pub mod core;
pub mod error;
pub mod observe;
pub mod telemetry;
pub mod vega;

pub use api::{BridgeConfig, ChartEngine, StoreEngine, SyncBridge};
pub use error::{BridgeError, BridgeResult};
