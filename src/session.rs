//! Page-lifetime session: the shared controller plus its event wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser callbacks (control clicks, media query changes, retry timers) hold
//! weak handles to the controller, so dropping the session stops them from
//! doing anything. Startup runs strictly in order: decide and apply, subscribe
//! to reduced-motion changes, then bind the toggle control.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::controller::{ApplyError, Controller, LevelListener};
use crate::markup::ControlHandler;
use crate::mode::{Override, PerformanceLevel};
use crate::retry::{Timer, retry_until};

#[derive(Clone)]
pub struct BackgroundSession {
    controller: Rc<RefCell<Controller>>,
    timer: Rc<dyn Timer>,
}

impl BackgroundSession {
    #[must_use]
    pub fn new(controller: Controller, timer: Rc<dyn Timer>) -> Self {
        Self { controller: Rc::new(RefCell::new(controller)), timer }
    }

    /// Full startup sequence. Returns the level applied on load.
    pub fn start(&self) -> PerformanceLevel {
        let level = self.initialize();
        if !self.watch_reduced_motion() {
            log::debug!("reduced-motion change notifications unavailable");
        }
        self.bind_control();
        level
    }

    /// Decide and apply from current signals, falling back to the low level.
    pub fn initialize(&self) -> PerformanceLevel {
        self.controller.borrow_mut().initialize()
    }

    /// Apply an explicit level without touching the stored override.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] when the markup or storage step fails.
    pub fn apply_level(&self, level: PerformanceLevel) -> Result<(), ApplyError> {
        self.controller.borrow_mut().apply_level(level)
    }

    /// Flip the override. Returns `None` when the toggle failed and the low
    /// level was forced instead.
    pub fn toggle(&self) -> Option<Override> {
        toggle_or_fallback(&self.controller)
    }

    /// Register a callback for every applied level. It must not call back
    /// into the session.
    pub fn subscribe(&self, listener: LevelListener) {
        self.controller.borrow_mut().subscribe(listener);
    }

    /// Re-run the decision on every reduced-motion change for the rest of the
    /// page lifetime.
    pub fn watch_reduced_motion(&self) -> bool {
        let weak = Rc::downgrade(&self.controller);
        self.controller.borrow().watch_reduced_motion(Rc::new(move || {
            if let Some(controller) = weak.upgrade() {
                controller.borrow_mut().initialize();
            }
        }))
    }

    /// Find the toggle control, retrying on the configured delay until it
    /// appears or the retry budget is spent. Safe to call repeatedly: each
    /// call replaces the previously attached click handler and gets a fresh
    /// budget.
    pub fn bind_control(&self) {
        let (policy, control_id) = {
            let controller = self.controller.borrow();
            (controller.config().retry_policy(), controller.config().control_id.clone())
        };

        let weak = Rc::downgrade(&self.controller);
        let id = control_id.clone();
        let attempt = Rc::new(move || {
            // Session dropped: nothing left to bind.
            let Some(controller) = weak.upgrade() else {
                return true;
            };
            let attached = controller.borrow().attach_control(toggle_handler(Rc::downgrade(&controller)));
            match attached {
                Ok(true) => {
                    controller.borrow_mut().mark_control_bound();
                    log::debug!("background toggle bound to #{id}");
                    true
                }
                Ok(false) => false,
                Err(err) => {
                    log::warn!("failed to bind background toggle #{id}: {err}");
                    false
                }
            }
        });
        let on_exhausted = Rc::new(move |retries: u32| {
            log::warn!("background toggle #{control_id} not found after {retries} retries");
        });
        retry_until(Rc::clone(&self.timer), policy, attempt, on_exhausted);
    }

    #[must_use]
    pub fn applied_level(&self) -> Option<PerformanceLevel> {
        self.controller.borrow().applied_level()
    }

    #[must_use]
    pub fn is_control_bound(&self) -> bool {
        self.controller.borrow().is_control_bound()
    }
}

fn toggle_handler(controller: Weak<RefCell<Controller>>) -> ControlHandler {
    Rc::new(move || {
        if let Some(controller) = controller.upgrade() {
            toggle_or_fallback(&controller);
        }
    })
}

fn toggle_or_fallback(controller: &RefCell<Controller>) -> Option<Override> {
    let result = controller.borrow_mut().toggle();
    match result {
        Ok(next) => Some(next),
        Err(err) => {
            log::warn!("background toggle failed, using static mode: {err}");
            controller.borrow_mut().force_low();
            None
        }
    }
}
