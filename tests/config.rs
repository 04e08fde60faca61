use starfall::config::{ConfigError, ConfigLoader, GameConfig, Span};

fn loader() -> ConfigLoader {
    ConfigLoader::new(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn fixture_profile_loads() {
    let config = loader().load("configs/arcade.yaml").expect("profile parses");
    assert_eq!(config.name, "arcade");
    assert_eq!(config.starting_lives, 3);
    assert_eq!(config.spawn_interval_ms, 800.0);
    assert_eq!(config.min_spawn_interval_ms, 300.0);
    assert_eq!(config.spawn_ramp, 0.995);
    assert_eq!(config.star_size.min, 18.0);
    assert_eq!(config.star_size.max, 42.0);
    assert_eq!(config.fall_speed.min, 80.0);
    assert_eq!(config.fall_speed.max, 220.0);
}

#[test]
fn omitted_fields_fall_back_to_defaults() {
    let config = GameConfig::from_yaml("name: sparse\n").expect("sparse profile parses");
    assert_eq!(config.name, "sparse");
    assert_eq!(config.width, 480.0);
    assert_eq!(config.height, 640.0);
    assert_eq!(config.max_frame_dt_ms, 40.0);
    assert_eq!(config.tilt.min, -0.04);
}

#[test]
fn profile_files_load_with_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("fast.yaml"),
        "name: fast\nspawn_interval_ms: 500.0\nmin_spawn_interval_ms: 400.0\n",
    )
    .expect("profile written");

    let config = ConfigLoader::new(dir.path())
        .load("fast.yaml")
        .expect("profile parses");
    assert_eq!(config.name, "fast");
    assert_eq!(config.spawn_interval_ms, 500.0);
    assert_eq!(config.min_spawn_interval_ms, 400.0);
    assert_eq!(config.height, 640.0);
}

#[test]
fn missing_profile_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(ConfigLoader::new(dir.path()).load("nope.yaml").is_err());
}

#[test]
fn malformed_yaml_is_an_error() {
    assert!(GameConfig::from_yaml("name: [unclosed").is_err());
}

#[test]
fn validation_rejects_bad_profiles() {
    let base = GameConfig::default();
    assert!(base.validate().is_ok());

    let mut config = base.clone();
    config.spawn_ramp = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::BadRamp(_))));

    let mut config = base.clone();
    config.spawn_ramp = 1.5;
    assert!(matches!(config.validate(), Err(ConfigError::BadRamp(_))));

    let mut config = base.clone();
    config.min_spawn_interval_ms = 900.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::BadSpawnFloor { .. })
    ));

    let mut config = base.clone();
    config.starting_lives = 0;
    assert!(matches!(config.validate(), Err(ConfigError::NoLives)));

    let mut config = base.clone();
    config.star_size = Span {
        min: 42.0,
        max: 18.0,
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyRange { field: "star_size", .. })
    ));

    let mut config = base.clone();
    config.width = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::BadBounds { .. })
    ));

    let mut config = base.clone();
    config.star_size = Span {
        min: 18.0,
        max: 300.0,
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::StarTooWide { .. })
    ));

    let mut config = base.clone();
    config.fall_speed = Span {
        min: -5.0,
        max: 220.0,
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonPositiveRange { .. })
    ));
}
