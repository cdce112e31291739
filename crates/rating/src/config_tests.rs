use super::*;

#[test]
fn test_defaults() {
    let config = RateConfig::default();
    assert_eq!(config.bayeselo, PathBuf::from("tools/bin/bayeselo"));
    assert_eq!(config.json_style, JsonStyle::Auto);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = RateConfig::from_toml_str("json_style = \"compact\"\n").unwrap();
    assert_eq!(config.json_style, JsonStyle::Compact);
    assert_eq!(config.bayeselo, PathBuf::from(DEFAULT_BAYESELO));
}

#[test]
fn test_unknown_key_rejected() {
    assert!(RateConfig::from_toml_str("bayselo = \"/usr/bin/bayeselo\"\n").is_err());
}

#[test]
fn test_overrides_win() {
    let config = RateConfig::from_toml_str("bayeselo = \"/opt/bayeselo\"\njson_style = \"pretty\"\n")
        .unwrap()
        .with_overrides(Some(PathBuf::from("/usr/local/bin/bayeselo")), None);
    assert_eq!(config.bayeselo, PathBuf::from("/usr/local/bin/bayeselo"));
    assert_eq!(config.json_style, JsonStyle::Pretty);
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rate.toml");
    let config = RateConfig {
        bayeselo: PathBuf::from("/opt/bayeselo"),
        json_style: JsonStyle::Compact,
    };

    config.save(&path).unwrap();
    assert_eq!(RateConfig::load(&path).unwrap(), config);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    match RateConfig::load(&dir.path().join("nope.toml")) {
        Err(RateError::InputNotFound { kind, .. }) => assert_eq!(kind, InputKind::Config),
        other => panic!("expected InputNotFound, got {:?}", other),
    }
}

#[test]
fn test_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rate.toml");
    std::fs::write(&path, "json_style = [").unwrap();

    assert!(matches!(RateConfig::load(&path), Err(RateError::Config { .. })));
}
