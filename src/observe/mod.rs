//! Observable state containers and message endpoints.
//!
//! Stores and ports are explicit handles passed to the components that use
//! them; there is no global registry.

mod chart_stores;
mod message_port;
mod registry;
mod store;

pub use chart_stores::{ChartSnapshot, ChartStores, StoreKind};
pub use message_port::{MessageEvent, MessagePort};
pub use registry::SubscriptionId;
pub use store::Store;
