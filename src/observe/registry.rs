use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by a subscription; pass it back to unsubscribe.
///
/// Ids are unique across all stores and ports in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Ordered listener list shared by stores and message ports.
///
/// Dispatch works on a copy of the list, so listeners may subscribe,
/// unsubscribe or read state re-entrantly. A listener removed mid-dispatch is
/// not invoked afterwards.
pub(crate) struct ListenerRegistry<F: ?Sized> {
    entries: RefCell<Vec<(SubscriptionId, Rc<F>)>>,
}

impl<F: ?Sized> Default for ListenerRegistry<F> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<F: ?Sized> ListenerRegistry<F> {
    pub(crate) fn add(&self, listener: Rc<F>) -> SubscriptionId {
        let id = SubscriptionId(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed));
        self.entries.borrow_mut().push((id, listener));
        id
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.iter().position(|(entry_id, _)| *entry_id == id) {
            Some(position) => {
                entries.remove(position);
                true
            }
            None => false,
        }
    }

    pub(crate) fn contains(&self, id: SubscriptionId) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(entry_id, _)| *entry_id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Invokes `call` for every live listener, stopping at the first error.
    pub(crate) fn dispatch<E>(&self, mut call: impl FnMut(&F) -> Result<(), E>) -> Result<(), E> {
        let listeners: Vec<(SubscriptionId, Rc<F>)> = self
            .entries
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in listeners {
            if self.contains(id) {
                call(&listener)?;
            }
        }
        Ok(())
    }
}
