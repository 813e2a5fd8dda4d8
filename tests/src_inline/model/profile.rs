use super::*;

#[test]
fn test_legacy_profile_is_uncapped_on_120() {
    let profile = ScoringProfile::legacy_v1();
    assert_eq!(profile.min_score, 1);
    assert_eq!(profile.max_score, 120);
    assert_eq!(profile.default_score, 100);
    assert_eq!(profile.cap, CapPolicy::Uncapped);
    assert_eq!(profile.display_scale, 120);
}

#[test]
fn test_standard_profile_caps_at_100() {
    let profile = ScoringProfile::standard_v2();
    assert_eq!(profile.max_score, 100);
    assert_eq!(profile.cap, CapPolicy::CapAt(SUB_SCORE_CAP));
    assert_eq!(profile.display_scale, 100);
}

#[test]
fn test_cap_policy_apply() {
    assert_eq!(CapPolicy::Uncapped.apply(150.0), 150.0);
    assert_eq!(CapPolicy::CapAt(100).apply(150.0), 100.0);
    assert_eq!(CapPolicy::CapAt(100).apply(42.0), 42.0);
}

#[test]
fn test_with_cap_overrides_preset() {
    let capped = ScoringProfile::legacy_v1().with_cap(true);
    assert_eq!(capped.cap, CapPolicy::CapAt(100));
    assert_eq!(capped.max_score, 120);
    let uncapped = ScoringProfile::standard_v2().with_cap(false);
    assert_eq!(uncapped.cap, CapPolicy::Uncapped);
}

#[test]
fn test_for_scale_picks_preset() {
    assert_eq!(
        ScoringProfile::for_scale(ScoreScale::Legacy120),
        ScoringProfile::legacy_v1()
    );
    assert_eq!(
        ScoringProfile::for_scale(ScoreScale::Standard100),
        ScoringProfile::standard_v2()
    );
}

#[test]
fn test_contains_and_clamp() {
    let profile = ScoringProfile::standard_v2();
    assert!(profile.contains(1));
    assert!(profile.contains(100));
    assert!(!profile.contains(0));
    assert!(!profile.contains(101));
    assert_eq!(profile.clamp(0), 1);
    assert_eq!(profile.clamp(120), 100);
    assert_eq!(profile.clamp(55), 55);
}
