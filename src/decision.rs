//! Pure performance level decision.

#[cfg(test)]
#[path = "decision_test.rs"]
mod decision_test;

use crate::device::DeviceKind;
use crate::mode::{Override, PerformanceLevel};

/// Every input the decision depends on, captured at decision time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackgroundModeState {
    pub override_mode: Option<Override>,
    pub reduced_motion: bool,
    pub device: DeviceKind,
}

impl BackgroundModeState {
    #[must_use]
    pub fn decide(&self) -> PerformanceLevel {
        decide(self)
    }
}

/// Resolve the level to apply. First match wins:
///
/// 1. explicit override
/// 2. reduced motion → low
/// 3. desktop → high, anything else → low
#[must_use]
pub fn decide(state: &BackgroundModeState) -> PerformanceLevel {
    if let Some(choice) = state.override_mode {
        return choice.level();
    }
    if state.reduced_motion {
        return PerformanceLevel::Low;
    }
    match state.device {
        DeviceKind::Desktop => PerformanceLevel::High,
        DeviceKind::Mobile | DeviceKind::Tablet => PerformanceLevel::Low,
    }
}
