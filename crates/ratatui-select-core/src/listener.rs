//! Registration of controls that receive key events.
//!
//! A control is reachable from the keyboard only while it holds a [`ListenerGuard`]. The guard
//! detaches on drop, so unmounting a control (dropping it, or dropping its guard before attaching
//! again) can never leave a stale or duplicate registration behind.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::rc::Weak;

/// Identifies one control inside a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(pub u32);

type Registry = RefCell<BTreeMap<WidgetId, usize>>;

#[derive(Clone, Debug, Default)]
pub struct KeyListeners {
    inner: Rc<Registry>,
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, id: WidgetId) -> ListenerGuard {
        *self.inner.borrow_mut().entry(id).or_insert(0) += 1;
        log::trace!("key listener attached: {id:?}");
        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    pub fn is_attached(&self, id: WidgetId) -> bool {
        self.count(id) > 0
    }

    /// Number of live registrations for `id`. More than one means a guard leaked.
    pub fn count(&self, id: WidgetId) -> usize {
        self.inner.borrow().get(&id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

#[derive(Debug)]
pub struct ListenerGuard {
    id: WidgetId,
    registry: Weak<Registry>,
}

impl ListenerGuard {
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Whether this guard belongs to `listeners`.
    pub fn is_registered_in(&self, listeners: &KeyListeners) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| Rc::ptr_eq(&r, &listeners.inner))
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut map = registry.borrow_mut();
        if let Some(n) = map.get_mut(&self.id) {
            *n -= 1;
            if *n == 0 {
                map.remove(&self.id);
            }
        }
        log::trace!("key listener detached: {:?}", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_guard_detaches() {
        let listeners = KeyListeners::new();
        let id = WidgetId(1);
        let guard = listeners.attach(id);
        assert!(listeners.is_attached(id));
        assert_eq!(guard.id(), id);
        drop(guard);
        assert!(!listeners.is_attached(id));
        assert!(listeners.is_empty());
    }

    #[test]
    fn reattach_after_release_keeps_one_registration() {
        let listeners = KeyListeners::new();
        let id = WidgetId(7);
        let mut slot = Some(listeners.attach(id));
        slot.take();
        slot = Some(listeners.attach(id));
        assert_eq!(listeners.count(id), 1);
        assert!(slot.as_ref().is_some_and(|g| g.is_registered_in(&listeners)));
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let guard = {
            let listeners = KeyListeners::new();
            listeners.attach(WidgetId(3))
        };
        drop(guard);
    }
}
