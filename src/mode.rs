//! Mode value types and their string forms in storage and markup.

#[cfg(test)]
#[path = "mode_test.rs"]
mod mode_test;

use crate::consts::{CLASS_PERFORMANCE_HIGH, CLASS_PERFORMANCE_LOW, SWITCHED_TO_DYNAMIC, SWITCHED_TO_STATIC};

/// Explicit user choice persisted under the mode key.
///
/// "Unset" is modelled as `Option<Override>::None` rather than a third variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Override {
    Dynamic,
    Static,
}

impl Override {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dynamic => "dynamic",
            Self::Static => "static",
        }
    }

    /// Parse a stored override. Anything but the two literals reads as unset.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "dynamic" => Some(Self::Dynamic),
            "static" => Some(Self::Static),
            _ => None,
        }
    }

    /// Next override when the user clicks the toggle. Unset behaves as `Static`.
    #[must_use]
    pub fn toggled(current: Option<Self>) -> Self {
        match current {
            Some(Self::Dynamic) => Self::Static,
            Some(Self::Static) | None => Self::Dynamic,
        }
    }

    #[must_use]
    pub fn level(self) -> PerformanceLevel {
        match self {
            Self::Dynamic => PerformanceLevel::High,
            Self::Static => PerformanceLevel::Low,
        }
    }

    /// Notification text announcing a switch into this mode.
    #[must_use]
    pub fn announcement(self) -> &'static str {
        match self {
            Self::Dynamic => SWITCHED_TO_DYNAMIC,
            Self::Static => SWITCHED_TO_STATIC,
        }
    }
}

/// Animation intensity applied to the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PerformanceLevel {
    High,
    Low,
}

impl PerformanceLevel {
    /// Root class name, also the value cached under the level key.
    #[must_use]
    pub fn as_class(self) -> &'static str {
        match self {
            Self::High => CLASS_PERFORMANCE_HIGH,
            Self::Low => CLASS_PERFORMANCE_LOW,
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            CLASS_PERFORMANCE_HIGH => Some(Self::High),
            CLASS_PERFORMANCE_LOW => Some(Self::Low),
            _ => None,
        }
    }

    #[must_use]
    pub fn mode(self) -> BackgroundMode {
        match self {
            Self::High => BackgroundMode::Dynamic,
            Self::Low => BackgroundMode::Static,
        }
    }
}

/// User-facing name of a level, written to the root mode attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackgroundMode {
    Dynamic,
    Static,
}

impl BackgroundMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dynamic => "dynamic",
            Self::Static => "static",
        }
    }
}
