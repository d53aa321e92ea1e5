use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::BridgeResult;

use super::registry::{ListenerRegistry, SubscriptionId};

/// Structured message posted by an embedding context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub origin: String,
    pub data: Value,
}

impl MessageEvent {
    #[must_use]
    pub fn new(origin: impl Into<String>, data: Value) -> Self {
        Self {
            origin: origin.into(),
            data,
        }
    }
}

type MessageListener = dyn Fn(&MessageEvent) -> BridgeResult<()>;

/// Window-like endpoint that delivers posted messages to its listeners.
#[derive(Clone, Default)]
pub struct MessagePort {
    listeners: Rc<ListenerRegistry<MessageListener>>,
}

impl fmt::Debug for MessagePort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagePort")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl MessagePort {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &self,
        listener: impl Fn(&MessageEvent) -> BridgeResult<()> + 'static,
    ) -> SubscriptionId {
        self.listeners.add(Rc::new(listener))
    }

    pub fn remove_listener(&self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Delivers `event` to every listener. The first listener error aborts
    /// delivery and is returned to the poster.
    pub fn post(&self, event: MessageEvent) -> BridgeResult<()> {
        trace!(
            origin = %event.origin,
            listeners = self.listeners.len(),
            "post message"
        );
        self.listeners.dispatch(|listener| listener(&event))
    }
}
