//! Background mode controller: decide, apply, and toggle.
//!
//! The controller owns every collaborator behind a trait object, so the same
//! logic runs against the browser in production and in-memory doubles in
//! tests. It is single-threaded and not re-entrant: level listeners run while
//! the controller is mutably borrowed and must not call back into it.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::config::BackgroundConfig;
use crate::consts::{
    CLASS_PERFORMANCE_HIGH, CLASS_REDUCE_MOTION, MANAGED_CLASSES, MODE_ATTRIBUTE, TITLE_ATTRIBUTE, TITLE_TO_DYNAMIC,
    TITLE_TO_STATIC,
};
use crate::decision::BackgroundModeState;
use crate::device::{DeviceClassifier, UserAgentClassifier};
use crate::markup::{ControlHandler, Markup, MarkupError};
use crate::mode::{Override, PerformanceLevel};
use crate::notify::{Notifier, announce};
use crate::platform::{Platform, PreferenceHandler};
use crate::store::{Store, StoreError};

/// Called with every successfully applied level.
pub type LevelListener = Box<dyn FnMut(PerformanceLevel)>;

#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error(transparent)]
    Markup(#[from] MarkupError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct Controller {
    config: BackgroundConfig,
    store: Box<dyn Store>,
    markup: Box<dyn Markup>,
    platform: Box<dyn Platform>,
    classifier: Box<dyn DeviceClassifier>,
    notifier: Option<Box<dyn Notifier>>,
    listeners: Vec<LevelListener>,
    control_bound: bool,
    applied: Option<PerformanceLevel>,
}

impl Controller {
    #[must_use]
    pub fn new(
        config: BackgroundConfig,
        store: Box<dyn Store>,
        markup: Box<dyn Markup>,
        platform: Box<dyn Platform>,
    ) -> Self {
        Self {
            config,
            store,
            markup,
            platform,
            classifier: Box::new(UserAgentClassifier),
            notifier: None,
            listeners: Vec::new(),
            control_bound: false,
            applied: None,
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Box<dyn DeviceClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    /// Level last written to the page root, if any.
    #[must_use]
    pub fn applied_level(&self) -> Option<PerformanceLevel> {
        self.applied
    }

    #[must_use]
    pub fn is_control_bound(&self) -> bool {
        self.control_bound
    }

    pub fn subscribe(&mut self, listener: LevelListener) {
        self.listeners.push(listener);
    }

    // --- Decision ---

    /// Stored override; unknown values read as unset.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when storage cannot be read.
    pub fn override_mode(&self) -> Result<Option<Override>, StoreError> {
        Ok(self.store.get(&self.config.mode_key)?.as_deref().and_then(Override::parse))
    }

    /// Snapshot every decision input.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the override cannot be read.
    pub fn current_state(&self) -> Result<BackgroundModeState, StoreError> {
        Ok(BackgroundModeState {
            override_mode: self.override_mode()?,
            reduced_motion: self.platform.prefers_reduced_motion(),
            device: self.classifier.classify(&self.platform.device_signals()),
        })
    }

    /// Decide and apply, forcing the low level if anything fails.
    pub fn initialize(&mut self) -> PerformanceLevel {
        match self.decide_and_apply() {
            Ok(level) => level,
            Err(err) => {
                log::warn!("background mode setup failed, using static mode: {err}");
                self.force_low()
            }
        }
    }

    fn decide_and_apply(&mut self) -> Result<PerformanceLevel, ApplyError> {
        let state = self.current_state()?;
        let level = state.decide();
        log::debug!(
            "background decision: override={:?} reduced_motion={} device={} -> {}",
            state.override_mode.map(Override::as_str),
            state.reduced_motion,
            state.device.as_str(),
            level.as_class()
        );
        self.apply_level(level)?;
        Ok(level)
    }

    /// Apply the low level as a last resort. Failure here is logged only.
    pub fn force_low(&mut self) -> PerformanceLevel {
        if let Err(err) = self.apply_level(PerformanceLevel::Low) {
            log::warn!("static background fallback failed: {err}");
        }
        PerformanceLevel::Low
    }

    // --- Apply ---

    /// Write `level` to the page root and cache it in storage.
    ///
    /// Once the root reflects `level` it counts as applied and a bound
    /// control's title follows it, even if caching the level then fails.
    /// Listeners only hear about fully successful applies.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] for the first markup or storage step that fails;
    /// earlier steps are not rolled back.
    pub fn apply_level(&mut self, level: PerformanceLevel) -> Result<(), ApplyError> {
        self.markup.remove_root_classes(&MANAGED_CLASSES)?;
        self.markup.add_root_class(level.as_class())?;
        self.markup.set_root_attribute(MODE_ATTRIBUTE, level.mode().as_str())?;
        if self.platform.prefers_reduced_motion() {
            self.markup.add_root_class(CLASS_REDUCE_MOTION)?;
        }
        self.applied = Some(level);
        if self.control_bound {
            if let Err(err) = self.refresh_control_title() {
                log::warn!("failed to update background toggle title: {err}");
            }
        }

        self.store.set(&self.config.level_key, level.as_class())?;
        log::info!("aurora background level: {}", level.as_class());
        for listener in &mut self.listeners {
            listener(level);
        }
        Ok(())
    }

    // --- Toggle ---

    /// Flip the stored override, persist it, and apply the matching level.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] if the override cannot be read or written, or the
    /// new level cannot be applied. No notification is shown on error.
    pub fn toggle(&mut self) -> Result<Override, ApplyError> {
        let next = Override::toggled(self.override_mode()?);
        self.store.set(&self.config.mode_key, next.as_str())?;
        self.apply_level(next.level())?;
        announce(self.notifier.as_deref(), next.announcement());
        Ok(next)
    }

    // --- Control ---

    /// Attach `handler` to the configured control. `Ok(false)` when absent.
    ///
    /// # Errors
    ///
    /// Propagates [`MarkupError`] from listener registration.
    pub fn attach_control(&self, handler: ControlHandler) -> Result<bool, MarkupError> {
        self.markup.attach_control(&self.config.control_id, handler)
    }

    /// Mark the control bound so later applies keep its title current.
    pub fn mark_control_bound(&mut self) {
        self.control_bound = true;
        if let Err(err) = self.refresh_control_title() {
            log::warn!("failed to update background toggle title: {err}");
        }
    }

    /// Tooltip describing what the next click does.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] when the root or the override cannot be read.
    pub fn control_title(&self) -> Result<&'static str, ApplyError> {
        let dynamic = self.markup.has_root_class(CLASS_PERFORMANCE_HIGH)?
            || self.override_mode()? == Some(Override::Dynamic);
        Ok(if dynamic { TITLE_TO_STATIC } else { TITLE_TO_DYNAMIC })
    }

    fn refresh_control_title(&self) -> Result<(), ApplyError> {
        let title = self.control_title()?;
        self.markup
            .set_control_attribute(&self.config.control_id, TITLE_ATTRIBUTE, title)?;
        Ok(())
    }

    /// Forward a reduced-motion subscription to the platform.
    pub fn watch_reduced_motion(&self, handler: PreferenceHandler) -> bool {
        self.platform.watch_reduced_motion(handler)
    }
}
