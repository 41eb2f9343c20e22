use super::*;

#[test]
fn test_parse_full_config() {
    let toml_str = r#"
[input]
kind = "csv"
path = "turns.csv"

[output]
path = "out/grouped.json"
create_dirs = true

[logging]
level = "debug"
format = "json"
"#;

    let config: AppConfig = toml::from_str(toml_str).unwrap();

    assert_eq!(config.input.kind, InputKindConfig::Csv);
    assert_eq!(config.input.path.as_deref(), Some(Path::new("turns.csv")));

    assert_eq!(config.output.path, PathBuf::from("out/grouped.json"));
    assert!(config.output.create_dirs);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_defaults_applied() {
    let config: AppConfig = toml::from_str("").unwrap();

    // InputConfig defaults
    assert_eq!(config.input.kind, InputKindConfig::Sample);
    assert!(config.input.path.is_none());

    // OutputConfig defaults
    assert_eq!(config.output.path, PathBuf::from("data/json_output1.json"));
    assert!(!config.output.create_dirs);

    // LoggingConfig defaults
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "pretty");
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let toml_str = r#"
[output]
create_dirs = true
"#;

    let config: AppConfig = toml::from_str(toml_str).unwrap();

    assert!(config.output.create_dirs);
    assert_eq!(config.output.path, PathBuf::from("data/json_output1.json"));
}

#[test]
fn test_sqlite_input_kind() {
    let toml_str = r#"
[input]
kind = "sqlite"
path = "turns.db"
"#;

    let config: AppConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.input.kind, InputKindConfig::Sqlite);
}

#[test]
fn test_unknown_input_kind_rejected() {
    let toml_str = r#"
[input]
kind = "parquet"
"#;

    assert!(toml::from_str::<AppConfig>(toml_str).is_err());
}

#[test]
fn test_from_file_reads_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dj.toml");
    std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

    let config = AppConfig::load(Some(path.as_path())).unwrap();

    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = AppConfig::load(Some(path.as_path())).unwrap_err();

    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_locate_prefers_explicit_path() {
    let located = AppConfig::locate(Some(Path::new("conf/other.toml")));

    assert_eq!(located, Some(PathBuf::from("conf/other.toml")));
}
