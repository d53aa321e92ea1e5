use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BridgeError, BridgeResult};
use crate::observe::{MessageEvent, MessagePort, SubscriptionId};

use super::ChartEngine;

/// Which message origins are allowed to push models.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "origins", rename_all = "camelCase")]
pub enum OriginPolicy {
    /// Accept messages from any origin.
    #[default]
    AnyOrigin,
    /// Accept only exact origin matches.
    AllowList(Vec<String>),
}

impl OriginPolicy {
    #[must_use]
    pub fn allows(&self, origin: &str) -> bool {
        match self {
            Self::AnyOrigin => true,
            Self::AllowList(origins) => origins.iter().any(|allowed| allowed == origin),
        }
    }
}

/// Extracts the `model` field of a message payload untouched.
///
/// Checking its shape is left to the engine.
pub fn extract_model(event: &MessageEvent) -> BridgeResult<&Value> {
    event.data.get("model").ok_or_else(|| {
        BridgeError::MalformedMessage("payload has no `model` field".to_owned())
    })
}

/// Single message listener forwarding posted models to the engine.
///
/// Detaches itself when dropped.
#[derive(Debug)]
pub struct MessageReceiver {
    port: MessagePort,
    subscription: Option<SubscriptionId>,
}

impl MessageReceiver {
    pub fn attach(port: &MessagePort, engine: Rc<dyn ChartEngine>, policy: OriginPolicy) -> Self {
        let subscription = port.add_listener(move |event| {
            if !policy.allows(&event.origin) {
                warn!(origin = %event.origin, "dropping message from disallowed origin");
                return Ok(());
            }
            let model = extract_model(event)?.clone();
            debug!(origin = %event.origin, "forward posted model");
            engine.receive_model(model)
        });
        debug!(id = subscription.get(), "attach message receiver");
        Self {
            port: port.clone(),
            subscription: Some(subscription),
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Removes the listener. Returns `false` when already detached.
    pub fn detach(&mut self) -> bool {
        match self.subscription.take() {
            Some(id) => {
                debug!(id = id.get(), "detach message receiver");
                self.port.remove_listener(id)
            }
            None => false,
        }
    }
}

impl Drop for MessageReceiver {
    fn drop(&mut self) {
        self.detach();
    }
}
