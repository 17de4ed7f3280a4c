use std::path::PathBuf;

use eco_cleaner::config::*;
use eco_cleaner::error::ConfigError;

#[test]
fn defaults_match_classic_rules() {
    let c = GameConfig::default();
    assert_eq!((c.screen.width, c.screen.height, c.screen.fps), (800, 600, 30));
    assert_eq!(c.rules.starting_lives, 3);
    assert_eq!(c.rules.hazard_pool, 10);
    assert_eq!(c.rules.player_speed, 10);
    assert_eq!(c.rules.score_per_catch, 10);
    assert_eq!(c.rules.pollution_relief, 5);
    assert_eq!(c.rules.max_pollution, 100);
    assert_eq!(c.rules.reward_lifetime, 60);
    assert_eq!(c.rules.alert_duration, 180);
    assert_eq!(c.rules.alert_chance, 0.2);
    assert_eq!(c.rules.respawn_chance, 0.6);
    assert_eq!(c.assets.dir, PathBuf::from("img"));
    assert!(c.logging.file.is_none());
    assert!(c.validate().is_ok());
}

#[test]
fn empty_document_is_default() {
    assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
}

#[test]
fn partial_document_overrides_named_keys() {
    let c = GameConfig::from_toml_str(
        r#"
        [screen]
        fps = 60

        [rules]
        starting_lives = 5
        respawn_chance = 0.8

        [logging]
        file = "game.log"
        "#,
    )
    .unwrap();
    assert_eq!(c.screen.fps, 60);
    assert_eq!(c.screen.width, 800);
    assert_eq!(c.rules.starting_lives, 5);
    assert_eq!(c.rules.respawn_chance, 0.8);
    assert_eq!(c.rules.alert_chance, 0.2);
    assert_eq!(c.logging.file, Some(PathBuf::from("game.log")));
}

#[test]
fn bad_probability_is_rejected() {
    let err = GameConfig::from_toml_str("[rules]\nalert_chance = 1.5\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "rules.alert_chance", .. }));
}

#[test]
fn empty_speed_range_is_rejected() {
    let err =
        GameConfig::from_toml_str("[rules]\nhazard_speed_min = 3\nhazard_speed_max = 3\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "rules.hazard_speed_min", .. }));
}

#[test]
fn spawning_on_screen_is_rejected() {
    let err = GameConfig::from_toml_str("[rules]\nhazard_spawn_y_max = 50\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn zero_fps_is_rejected() {
    let err = GameConfig::from_toml_str("[screen]\nfps = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "screen.fps", .. }));
}

#[test]
fn unknown_keys_and_bad_types_fail_to_parse() {
    assert!(matches!(
        GameConfig::from_toml_str("[rules]\nlives = 3\n"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        GameConfig::from_toml_str("[screen]\nwidth = \"wide\"\n"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn missing_file_means_defaults() {
    let path = std::env::temp_dir().join("eco_cleaner_no_such_config.toml");
    let _ = std::fs::remove_file(&path);
    assert_eq!(GameConfig::load_or_default(&path).unwrap(), GameConfig::default());
}

#[test]
fn existing_file_is_loaded() {
    let path = std::env::temp_dir().join(format!("eco_cleaner_cfg_{}.toml", std::process::id()));
    std::fs::write(&path, "[rules]\nhazard_pool = 4\n").unwrap();
    let c = GameConfig::load_or_default(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(c.rules.hazard_pool, 4);
}
