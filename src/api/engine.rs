use std::cell::Cell;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::{ChartModel, InputData};
use crate::error::{BridgeError, BridgeResult};
use crate::observe::ChartStores;

use super::input_validation::validate_input;

/// Chart-property key the host's rows are written to.
pub const INPUT_KEY: &str = "input";

/// Action entry points of the chart engine.
///
/// These are the only writes the bridge and message receiver perform; all
/// chart state is read back through the stores.
pub trait ChartEngine {
    /// Validates and merges a complete model, exactly as it was posted.
    fn receive_model(&self, model: Value) -> BridgeResult<()>;

    /// Replaces one chart-property entry with new input data.
    fn update_input(&self, key: &str, input: InputData) -> BridgeResult<()>;
}

/// Headless engine that applies actions directly to a [`ChartStores`] bundle.
///
/// Validation stays silent until input has been supplied through
/// [`ChartEngine::update_input`], so a freshly loaded model never reports a
/// spurious empty-data problem.
#[derive(Debug)]
pub struct StoreEngine {
    stores: ChartStores,
    input_received: Cell<bool>,
}

impl StoreEngine {
    #[must_use]
    pub fn new(stores: ChartStores) -> Self {
        Self {
            stores,
            input_received: Cell::new(false),
        }
    }

    #[must_use]
    pub fn stores(&self) -> &ChartStores {
        &self.stores
    }

    #[must_use]
    pub fn input_received(&self) -> bool {
        self.input_received.get()
    }

    fn revalidate(&self) {
        let errors = if self.input_received.get() {
            self.stores.properties.with(|props| validate_input(&props.input))
        } else {
            Default::default()
        };
        debug!(count = errors.len(), valid = errors.is_valid(), "revalidate input");
        self.stores.errors.replace(errors);
    }
}

impl ChartEngine for StoreEngine {
    fn receive_model(&self, model: Value) -> BridgeResult<()> {
        let model = ChartModel::deserialize(&model)
            .map_err(|e| BridgeError::InvalidData(format!("rejected chart model: {e}")))?;
        let ChartModel {
            chart_props,
            metadata,
            session,
            ..
        } = model;
        debug!(
            chart_type = %metadata.chart_type,
            settings = chart_props.chart_settings.len(),
            "receive model"
        );
        if !chart_props.input.is_blank() {
            self.input_received.set(true);
        }
        self.stores.properties.replace(chart_props);
        self.stores.metadata.replace(metadata);
        self.stores.session.replace(session);
        self.revalidate();
        Ok(())
    }

    fn update_input(&self, key: &str, input: InputData) -> BridgeResult<()> {
        if key.is_empty() {
            return Err(BridgeError::InvalidData(
                "input key must not be empty".to_owned(),
            ));
        }
        debug!(key, bytes = input.raw.len(), "update input");
        if key == INPUT_KEY {
            self.input_received.set(true);
            self.stores.properties.update(|props| props.input = input);
        } else {
            let value = serde_json::to_value(&input).map_err(|e| {
                BridgeError::InvalidData(format!("failed to encode input `{key}`: {e}"))
            })?;
            self.stores.properties.update(|props| {
                props.extra.insert(key.to_owned(), value);
            });
        }
        self.revalidate();
        Ok(())
    }
}
