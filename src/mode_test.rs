use super::*;

// =============================================================
// Override
// =============================================================

#[test]
fn override_parse_accepts_only_known_literals() {
    assert_eq!(Override::parse("dynamic"), Some(Override::Dynamic));
    assert_eq!(Override::parse("static"), Some(Override::Static));
    assert_eq!(Override::parse("auto"), None);
    assert_eq!(Override::parse(""), None);
    assert_eq!(Override::parse("Dynamic"), None);
}

#[test]
fn override_as_str_matches_parse() {
    for value in [Override::Dynamic, Override::Static] {
        assert_eq!(Override::parse(value.as_str()), Some(value));
    }
}

#[test]
fn toggled_from_unset_moves_to_dynamic() {
    assert_eq!(Override::toggled(None), Override::Dynamic);
}

#[test]
fn toggled_flips_between_dynamic_and_static() {
    assert_eq!(Override::toggled(Some(Override::Static)), Override::Dynamic);
    assert_eq!(Override::toggled(Some(Override::Dynamic)), Override::Static);
}

#[test]
fn toggling_twice_is_an_involution() {
    for start in [Override::Dynamic, Override::Static] {
        let twice = Override::toggled(Some(Override::toggled(Some(start))));
        assert_eq!(twice, start);
    }
}

#[test]
fn override_maps_to_level() {
    assert_eq!(Override::Dynamic.level(), PerformanceLevel::High);
    assert_eq!(Override::Static.level(), PerformanceLevel::Low);
}

#[test]
fn announcement_names_the_new_mode() {
    assert!(Override::Dynamic.announcement().contains("dynamic"));
    assert!(Override::Static.announcement().contains("static"));
}

// =============================================================
// PerformanceLevel / BackgroundMode
// =============================================================

#[test]
fn level_class_names_match_markup_contract() {
    assert_eq!(PerformanceLevel::High.as_class(), "performance-high");
    assert_eq!(PerformanceLevel::Low.as_class(), "performance-low");
}

#[test]
fn level_parse_reads_class_names() {
    assert_eq!(PerformanceLevel::parse("performance-high"), Some(PerformanceLevel::High));
    assert_eq!(PerformanceLevel::parse("performance-low"), Some(PerformanceLevel::Low));
    assert_eq!(PerformanceLevel::parse("high"), None);
}

#[test]
fn level_mode_attribute_values() {
    assert_eq!(PerformanceLevel::High.mode().as_str(), "dynamic");
    assert_eq!(PerformanceLevel::Low.mode().as_str(), "static");
}
