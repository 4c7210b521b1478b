//! Host capability signals: device hints and the reduced-motion preference.

#[cfg(test)]
#[path = "platform_test.rs"]
mod platform_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::device::DeviceSignals;

/// Callback fired when the reduced-motion preference changes.
pub type PreferenceHandler = Rc<dyn Fn()>;

pub trait Platform {
    /// Current device signals. Unknown values are left as `None`/`false`.
    fn device_signals(&self) -> DeviceSignals;

    /// Whether the user asked the platform to minimise motion.
    fn prefers_reduced_motion(&self) -> bool;

    /// Subscribe for the rest of the page lifetime. Returns `false` when the
    /// host cannot deliver change notifications.
    fn watch_reduced_motion(&self, handler: PreferenceHandler) -> bool;
}

#[derive(Default)]
struct MemoryPlatformInner {
    signals: DeviceSignals,
    reduced_motion: bool,
    watchers: Vec<PreferenceHandler>,
}

/// Scriptable platform for native tests. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryPlatform {
    inner: Rc<RefCell<MemoryPlatformInner>>,
}

impl MemoryPlatform {
    #[must_use]
    pub fn new(signals: DeviceSignals) -> Self {
        let platform = Self::default();
        platform.inner.borrow_mut().signals = signals;
        platform
    }

    /// Change the preference and notify every watcher once.
    pub fn set_reduced_motion(&self, reduced: bool) {
        let watchers = {
            let mut inner = self.inner.borrow_mut();
            inner.reduced_motion = reduced;
            inner.watchers.clone()
        };
        for watcher in watchers {
            watcher();
        }
    }

    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.inner.borrow().watchers.len()
    }
}

impl Platform for MemoryPlatform {
    fn device_signals(&self) -> DeviceSignals {
        self.inner.borrow().signals.clone()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.inner.borrow().reduced_motion
    }

    fn watch_reduced_motion(&self, handler: PreferenceHandler) -> bool {
        self.inner.borrow_mut().watchers.push(handler);
        true
    }
}
