use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::registry::{ListenerRegistry, SubscriptionId};

struct StoreInner<T> {
    name: &'static str,
    state: RefCell<T>,
    listeners: ListenerRegistry<dyn Fn()>,
}

/// Observable state container holding one slice of chart state.
///
/// Cloning a `Store` clones the handle, not the state: every clone observes
/// and mutates the same slice.
pub struct Store<T> {
    inner: Rc<StoreInner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.name)
            .field("state", &self.inner.state.borrow())
            .field("listeners", &self.inner.listeners.len())
            .finish()
    }
}

impl<T: Clone> Store<T> {
    #[must_use]
    pub fn new(name: &'static str, initial: T) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                name,
                state: RefCell::new(initial),
                listeners: ListenerRegistry::default(),
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> T {
        self.inner.state.borrow().clone()
    }

    /// Reads the current state without cloning it.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.inner.state.borrow())
    }

    pub fn add_change_listener(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        let id = self.inner.listeners.add(Rc::new(listener));
        trace!(store = self.inner.name, id = id.get(), "add change listener");
        id
    }

    /// Returns `false` when `id` is not registered on this store.
    pub fn remove_change_listener(&self, id: SubscriptionId) -> bool {
        let removed = self.inner.listeners.remove(id);
        trace!(
            store = self.inner.name,
            id = id.get(),
            removed,
            "remove change listener"
        );
        removed
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    /// Replaces the state and notifies listeners.
    pub fn replace(&self, value: T) {
        *self.inner.state.borrow_mut() = value;
        self.emit_change();
    }

    /// Mutates the state in place and notifies listeners.
    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        mutate(&mut self.inner.state.borrow_mut());
        self.emit_change();
    }

    pub fn emit_change(&self) {
        trace!(
            store = self.inner.name,
            listeners = self.inner.listeners.len(),
            "emit change"
        );
        let _: Result<(), Infallible> = self.inner.listeners.dispatch(|listener| {
            listener();
            Ok(())
        });
    }
}
