use banjak_config::Settings;
use banjak_core::{MotionPreference, Speed};
use banjak_effects::EffectKind;

#[test]
fn empty_file_is_all_defaults() {
    let settings = Settings::from_toml("").unwrap();
    assert_eq!(settings.effect, EffectKind::Drift);
    assert_eq!(settings.speed, Speed::Normal);
    assert_eq!(settings.fps, 30);
    assert_eq!(settings.seed, None);
    assert!(!settings.overlay);
    assert_eq!(settings.trail.max_particles, 80);
}

#[test]
fn partial_override_keeps_the_rest() {
    let settings = Settings::from_toml(
        r#"
        effect = "fireflies"
        speed = "fast"
        seed = 42

        [trail]
        max_particles = 12

        [drift]
        count = 9
        "#,
    )
    .unwrap();
    assert_eq!(settings.effect, EffectKind::Fireflies);
    assert_eq!(settings.speed, Speed::Fast);
    assert_eq!(settings.resolve_seed(), 42);
    assert_eq!(settings.trail.max_particles, 12);
    assert_eq!(settings.drift.count, 9);
    // Untouched tables stay at their defaults.
    assert_eq!(settings.sparks.burst, 24);
    assert_eq!(settings.trail.min_move, 0.5);
}

#[test]
fn invalid_toml_is_an_error() {
    assert!(Settings::from_toml("effect = [not toml").is_err());
}

#[test]
fn unknown_effect_name_is_an_error() {
    assert!(Settings::from_toml(r#"effect = "confetti""#).is_err());
}

#[test]
fn reduced_motion_override_beats_the_environment() {
    let settings = Settings::from_toml("reduced_motion = true").unwrap();
    assert_eq!(settings.motion(), MotionPreference::Reduced);
    let settings = Settings::from_toml("reduced_motion = false").unwrap();
    assert_eq!(settings.motion(), MotionPreference::Full);
}

#[test]
fn every_kind_builds_from_settings() {
    let settings = Settings::from_toml("").unwrap();
    for kind in EffectKind::all() {
        // Constructing must not panic; behavior is covered by the effects
        // crate's own suites.
        let _ = settings.build(kind);
    }
}

#[test]
fn frame_interval_guards_against_degenerate_fps() {
    let settings = Settings::from_toml("fps = 0").unwrap();
    assert_eq!(settings.frame_interval().as_millis(), 1000);
    let settings = Settings::from_toml("fps = 60").unwrap();
    assert_eq!(settings.frame_interval().as_millis(), 16);
    // Anything past the ceiling would floor the interval to zero and spin
    // the host loop.
    let settings = Settings::from_toml("fps = 100000").unwrap();
    assert!(settings.frame_interval().as_millis() >= 4);
}
