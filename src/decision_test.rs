use super::*;

const OVERRIDES: [Option<Override>; 3] = [None, Some(Override::Dynamic), Some(Override::Static)];
const DEVICES: [DeviceKind; 3] = [DeviceKind::Mobile, DeviceKind::Tablet, DeviceKind::Desktop];

fn state(override_mode: Option<Override>, reduced_motion: bool, device: DeviceKind) -> BackgroundModeState {
    BackgroundModeState { override_mode, reduced_motion, device }
}

/// Independent restatement of the priority table.
fn expected(override_mode: Option<Override>, reduced_motion: bool, device: DeviceKind) -> PerformanceLevel {
    match (override_mode, reduced_motion, device) {
        (Some(Override::Dynamic), _, _) | (None, false, DeviceKind::Desktop) => PerformanceLevel::High,
        _ => PerformanceLevel::Low,
    }
}

#[test]
fn decision_matches_priority_table_for_every_combination() {
    for override_mode in OVERRIDES {
        for reduced_motion in [false, true] {
            for device in DEVICES {
                let s = state(override_mode, reduced_motion, device);
                assert_eq!(decide(&s), expected(override_mode, reduced_motion, device), "state: {s:?}");
            }
        }
    }
}

#[test]
fn unset_desktop_without_reduced_motion_is_high() {
    let s = state(None, false, DeviceKind::Desktop);
    assert_eq!(decide(&s), PerformanceLevel::High);
    assert_eq!(decide(&s).mode().as_str(), "dynamic");
}

#[test]
fn unset_mobile_without_reduced_motion_is_low() {
    let s = state(None, false, DeviceKind::Mobile);
    assert_eq!(decide(&s), PerformanceLevel::Low);
    assert_eq!(decide(&s).mode().as_str(), "static");
}

#[test]
fn dynamic_override_beats_reduced_motion_and_device() {
    assert_eq!(decide(&state(Some(Override::Dynamic), true, DeviceKind::Mobile)), PerformanceLevel::High);
}

#[test]
fn static_override_beats_desktop() {
    assert_eq!(decide(&state(Some(Override::Static), false, DeviceKind::Desktop)), PerformanceLevel::Low);
}

#[test]
fn reduced_motion_beats_desktop_when_unset() {
    assert_eq!(decide(&state(None, true, DeviceKind::Desktop)), PerformanceLevel::Low);
}

#[test]
fn tablet_defaults_to_low() {
    assert_eq!(decide(&state(None, false, DeviceKind::Tablet)), PerformanceLevel::Low);
}

#[test]
fn default_state_is_high() {
    assert_eq!(BackgroundModeState::default().decide(), PerformanceLevel::High);
}
