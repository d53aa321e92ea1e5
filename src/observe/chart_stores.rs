use serde::{Deserialize, Serialize};

use crate::core::{ChartModel, ChartProps, ErrorSet, Metadata, Session};

use super::registry::SubscriptionId;
use super::store::Store;

/// Identifies one of the four stores the bridge listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    Properties,
    Metadata,
    Session,
    Errors,
}

impl StoreKind {
    pub const ALL: [Self; 4] = [Self::Properties, Self::Metadata, Self::Session, Self::Errors];
}

/// Combined read of all four stores at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub chart_props: ChartProps,
    pub metadata: Metadata,
    pub session: Session,
    pub errors: ErrorSet,
    /// Set while validation problems are outstanding.
    pub loading: bool,
}

impl ChartSnapshot {
    /// Reassembles the chart model this snapshot mirrors.
    #[must_use]
    pub fn to_model(&self) -> ChartModel {
        ChartModel {
            chart_props: self.chart_props.clone(),
            metadata: self.metadata.clone(),
            session: self.session.clone(),
            extra: Default::default(),
        }
    }
}

/// The chart engine's state, split across four observable stores.
#[derive(Debug, Clone)]
pub struct ChartStores {
    pub properties: Store<ChartProps>,
    pub metadata: Store<Metadata>,
    pub session: Store<Session>,
    pub errors: Store<ErrorSet>,
}

impl Default for ChartStores {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartStores {
    #[must_use]
    pub fn new() -> Self {
        Self {
            properties: Store::new("chart-properties", ChartProps::default()),
            metadata: Store::new("chart-metadata", Metadata::default()),
            session: Store::new("session", Session::default()),
            errors: Store::new("errors", ErrorSet::new()),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let errors = self.errors.snapshot();
        ChartSnapshot {
            chart_props: self.properties.snapshot(),
            metadata: self.metadata.snapshot(),
            session: self.session.snapshot(),
            loading: errors.has_outstanding(),
            errors,
        }
    }

    pub fn add_change_listener(
        &self,
        kind: StoreKind,
        listener: impl Fn() + 'static,
    ) -> SubscriptionId {
        match kind {
            StoreKind::Properties => self.properties.add_change_listener(listener),
            StoreKind::Metadata => self.metadata.add_change_listener(listener),
            StoreKind::Session => self.session.add_change_listener(listener),
            StoreKind::Errors => self.errors.add_change_listener(listener),
        }
    }

    pub fn remove_change_listener(&self, kind: StoreKind, id: SubscriptionId) -> bool {
        match kind {
            StoreKind::Properties => self.properties.remove_change_listener(id),
            StoreKind::Metadata => self.metadata.remove_change_listener(id),
            StoreKind::Session => self.session.remove_change_listener(id),
            StoreKind::Errors => self.errors.remove_change_listener(id),
        }
    }

    #[must_use]
    pub fn listener_count(&self, kind: StoreKind) -> usize {
        match kind {
            StoreKind::Properties => self.properties.listener_count(),
            StoreKind::Metadata => self.metadata.listener_count(),
            StoreKind::Session => self.session.listener_count(),
            StoreKind::Errors => self.errors.listener_count(),
        }
    }

    #[must_use]
    pub fn total_listener_count(&self) -> usize {
        StoreKind::ALL
            .into_iter()
            .map(|kind| self.listener_count(kind))
            .sum()
    }

    /// Emits a change on `kind` without altering its state.
    pub fn emit_change(&self, kind: StoreKind) {
        match kind {
            StoreKind::Properties => self.properties.emit_change(),
            StoreKind::Metadata => self.metadata.emit_change(),
            StoreKind::Session => self.session.emit_change(),
            StoreKind::Errors => self.errors.emit_change(),
        }
    }
}
