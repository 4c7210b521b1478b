//! Device classification from user-agent and screen signals.
//!
//! Heuristics are best-effort. Missing or unrecognised signals classify as
//! [`DeviceKind::Desktop`], which is never an error.

#[cfg(test)]
#[path = "device_test.rs"]
mod device_test;

use crate::consts::{TABLET_MAX_WIDTH, TABLET_MIN_WIDTH};

const MOBILE_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl DeviceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

/// Raw capability signals read from the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceSignals {
    pub user_agent: Option<String>,
    /// Screen width in CSS pixels.
    pub screen_width: Option<u32>,
    pub touch: bool,
}

/// Maps raw signals to a device category.
pub trait DeviceClassifier {
    fn classify(&self, signals: &DeviceSignals) -> DeviceKind;
}

/// User-agent sniffing with a screen-width fallback for touch tablets.
#[derive(Clone, Copy, Debug, Default)]
pub struct UserAgentClassifier;

impl DeviceClassifier for UserAgentClassifier {
    fn classify(&self, signals: &DeviceSignals) -> DeviceKind {
        let ua = signals.user_agent.as_deref().unwrap_or_default().to_lowercase();
        if is_mobile(&ua) {
            DeviceKind::Mobile
        } else if is_tablet(&ua, signals) {
            DeviceKind::Tablet
        } else {
            DeviceKind::Desktop
        }
    }
}

fn is_mobile(ua: &str) -> bool {
    MOBILE_MARKERS.iter().any(|marker| ua.contains(marker))
}

fn is_tablet(ua: &str, signals: &DeviceSignals) -> bool {
    if ua.contains("ipad") {
        return true;
    }
    // Android tablets omit "mobile" after the platform token.
    if ua.rfind("android").is_some_and(|at| !ua[at..].contains("mobile")) {
        return true;
    }
    signals.touch
        && signals
            .screen_width
            .is_some_and(|width| (TABLET_MIN_WIDTH..=TABLET_MAX_WIDTH).contains(&width))
}
