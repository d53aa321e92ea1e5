use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{ChartModel, Row, rows_to_input};
use crate::error::{BridgeError, BridgeResult};
use crate::observe::{ChartSnapshot, ChartStores, MessagePort, StoreKind, SubscriptionId};

use super::{
    BridgeConfig, ChartEngine, ChartExporter, ChartStateCache, ChartView, Downloader,
    ExportFormat, ExportOutcome, ExportTarget, INPUT_KEY, MessageReceiver, ModelLoader,
    Rasterizer,
};

/// Values the embedding page supplies before mount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostInit {
    /// Persisted chart state; empty selects the family defaults.
    #[serde(default)]
    pub chart_state: String,
    #[serde(default)]
    pub input_rows: Vec<Row>,
}

impl HostInit {
    #[must_use]
    pub fn new(chart_state: impl Into<String>, input_rows: Vec<Row>) -> Self {
        Self {
            chart_state: chart_state.into(),
            input_rows,
        }
    }
}

/// Locally mirrored chart state.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeState {
    /// No store notification received yet.
    Loading,
    Ready(ChartSnapshot),
}

impl BridgeState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&ChartSnapshot> {
        match self {
            Self::Loading => None,
            Self::Ready(snapshot) => Some(snapshot),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Created,
    Loaded,
    Mounted,
    Unmounted,
}

type RenderHook = Rc<dyn Fn(&BridgeState, u64)>;

struct ViewCell {
    state: BridgeState,
    revision: u64,
    render_hook: Option<RenderHook>,
}

/// Mirrors the chart engine's stores into local state for one mounted chart.
pub struct SyncBridge {
    config: BridgeConfig,
    loader: ModelLoader,
    stores: ChartStores,
    engine: Rc<dyn ChartEngine>,
    host: HostInit,
    view: Rc<RefCell<ViewCell>>,
    subscriptions: SmallVec<[(StoreKind, SubscriptionId); 4]>,
    receiver: Option<MessageReceiver>,
    state_cache: ChartStateCache,
    phase: LifecyclePhase,
}

impl fmt::Debug for SyncBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view.borrow();
        f.debug_struct("SyncBridge")
            .field("phase", &self.phase)
            .field("revision", &view.revision)
            .field("loading", &view.state.is_loading())
            .field("subscriptions", &self.subscriptions.len())
            .field("receiver_attached", &self.receiver.is_some())
            .finish()
    }
}

impl SyncBridge {
    pub fn new(
        config: BridgeConfig,
        stores: ChartStores,
        engine: Rc<dyn ChartEngine>,
        host: HostInit,
    ) -> BridgeResult<Self> {
        config.validate()?;
        let loader = ModelLoader::new(config.family, config.overrides);
        Ok(Self {
            config,
            loader,
            stores,
            engine,
            host,
            view: Rc::new(RefCell::new(ViewCell {
                state: BridgeState::Loading,
                revision: 0,
                render_hook: None,
            })),
            subscriptions: SmallVec::new(),
            receiver: None,
            state_cache: ChartStateCache::new(),
            phase: LifecyclePhase::Created,
        })
    }

    /// Installs a hook invoked after every local state update.
    pub fn on_render(&mut self, hook: impl Fn(&BridgeState, u64) + 'static) {
        self.view.borrow_mut().render_hook = Some(Rc::new(hook));
    }

    /// Loads the persisted model (or defaults) and hands it to the engine.
    ///
    /// A parse failure aborts the mount attempt; nothing is dispatched.
    pub fn will_mount(&mut self) -> BridgeResult<()> {
        if self.phase != LifecyclePhase::Created {
            return Err(BridgeError::Lifecycle(format!(
                "will_mount called in phase {:?}",
                self.phase
            )));
        }
        let loaded = self.loader.load(&self.host.chart_state)?;
        if let Some(text) = loaded.source_text.as_deref() {
            self.state_cache.remember(text);
        }
        debug!(from_defaults = loaded.from_defaults(), "dispatch initial model");
        self.engine.receive_model(loaded.model.to_value()?)?;
        self.phase = LifecyclePhase::Loaded;
        Ok(())
    }

    /// Subscribes to the four stores, pushes the host rows and starts
    /// listening on `port`. Runs [`Self::will_mount`] first when needed.
    pub fn mount(&mut self, port: &MessagePort) -> BridgeResult<()> {
        match self.phase {
            LifecyclePhase::Created => self.will_mount()?,
            LifecyclePhase::Loaded => {}
            LifecyclePhase::Mounted | LifecyclePhase::Unmounted => {
                return Err(BridgeError::Lifecycle(format!(
                    "mount called in phase {:?}",
                    self.phase
                )));
            }
        }

        for kind in StoreKind::ALL {
            let view = Rc::downgrade(&self.view);
            let stores = self.stores.clone();
            let id = self
                .stores
                .add_change_listener(kind, move || refresh(&view, &stores, kind));
            self.subscriptions.push((kind, id));
        }

        let input = rows_to_input(&self.host.input_rows);
        if let Err(err) = self.engine.update_input(INPUT_KEY, input) {
            let removed = self.release_subscriptions();
            debug!(removed, error = %err, "mount rolled back");
            return Err(err);
        }

        self.phase = LifecyclePhase::Mounted;
        debug!(listeners = self.subscriptions.len(), "bridge mounted");
        self.receiver = Some(MessageReceiver::attach(
            port,
            Rc::clone(&self.engine),
            self.config.origin_policy.clone(),
        ));
        Ok(())
    }

    /// Removes exactly the listeners registered by [`Self::mount`].
    ///
    /// Returns the number of store listeners removed; zero when not mounted.
    pub fn unmount(&mut self) -> usize {
        let removed = self.release_subscriptions();
        if let Some(mut receiver) = self.receiver.take() {
            receiver.detach();
        }
        if self.phase == LifecyclePhase::Mounted {
            self.phase = LifecyclePhase::Unmounted;
            debug!(removed, "bridge unmounted");
        }
        removed
    }

    fn release_subscriptions(&mut self) -> usize {
        let mut removed = 0;
        for (kind, id) in self.subscriptions.drain(..) {
            if self.stores.remove_change_listener(kind, id) {
                removed += 1;
            }
        }
        removed
    }

    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> BridgeState {
        self.view.borrow().state.clone()
    }

    /// Number of local state updates so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.view.borrow().revision
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.view.borrow().state.is_loading()
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    #[must_use]
    pub fn stores(&self) -> &ChartStores {
        &self.stores
    }

    /// Render surface; `None` until the first snapshot arrives.
    #[must_use]
    pub fn view(&self) -> Option<ChartView> {
        let view = self.view.borrow();
        view.state
            .snapshot()
            .map(|snapshot| ChartView::from_snapshot(&self.config, snapshot))
    }

    #[must_use]
    pub fn current_model(&self) -> Option<ChartModel> {
        self.view.borrow().state.snapshot().map(ChartSnapshot::to_model)
    }

    /// Serializes the mirrored model for persistence.
    ///
    /// Returns `None` when nothing is loaded yet or the text matches what was
    /// last loaded or persisted.
    pub fn persist_state(&mut self) -> BridgeResult<Option<String>> {
        let Some(model) = self.current_model() else {
            return Ok(None);
        };
        let text = model.to_json_compact()?;
        if self.state_cache.remember(&text) {
            Ok(Some(text))
        } else {
            trace!("chart state unchanged, skipping persist");
            Ok(None)
        }
    }

    #[must_use]
    pub fn exporter(&self) -> ChartExporter {
        ChartExporter::new(
            self.config.svg_wrapper_class_name.clone(),
            self.config.export.clone(),
        )
    }

    /// Runs one export action against the host document.
    pub fn export(
        &self,
        format: ExportFormat,
        target: &dyn ExportTarget,
        rasterizer: &dyn Rasterizer,
        downloader: &mut dyn Downloader,
    ) -> BridgeResult<ExportOutcome> {
        let exporter = self.exporter();
        let title = self
            .view
            .borrow()
            .state
            .snapshot()
            .map(|snapshot| snapshot.metadata.title.clone())
            .unwrap_or_default();
        match format {
            ExportFormat::Png => exporter.export_png(target, rasterizer, downloader, &title),
            ExportFormat::Svg => exporter.export_svg(target, downloader, &title),
            ExportFormat::Json => match self.current_model() {
                Some(model) => exporter.export_json(&model, downloader),
                None if !self.config.export.enable_json_export => Ok(ExportOutcome::Disabled),
                None => Ok(ExportOutcome::TargetMissing),
            },
        }
    }
}

impl Drop for SyncBridge {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn refresh(view: &Weak<RefCell<ViewCell>>, stores: &ChartStores, kind: StoreKind) {
    let Some(view) = view.upgrade() else {
        return;
    };
    let snapshot = stores.snapshot();
    trace!(
        store = ?kind,
        loading = snapshot.loading,
        errors = snapshot.errors.len(),
        "store change"
    );

    let pending_render = {
        let mut cell = view.borrow_mut();
        cell.state = BridgeState::Ready(snapshot);
        cell.revision += 1;
        cell.render_hook
            .clone()
            .map(|hook| (hook, cell.state.clone(), cell.revision))
    };
    if let Some((hook, state, revision)) = pending_render {
        hook(&state, revision);
    }
}
