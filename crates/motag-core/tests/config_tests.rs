//! Tests for configuration loading and log entry rendering.

use motag_core::{Config, LogEntry, Severity};

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(
        config.tags,
        ["p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "span"]
    );
    assert_eq!(config.mo_class, "mo");
    assert_eq!(config.nomo_class, "nomo");
    assert_eq!(config.id_pattern, "^mo_id_[0-9]+$");
    assert_eq!(config.id_format, "mo_id_%d");
}

#[test]
fn test_partial_toml_falls_back_per_field() {
    let config: Config = toml::from_str(
        r#"
tags = ["p", "span"]
id_format = "f%06d"
"#,
    )
    .unwrap();

    assert_eq!(config.tags, ["p", "span"]);
    assert_eq!(config.id_format, "f%06d");
    assert_eq!(config.mo_class, "mo");
    assert_eq!(config.id_pattern, Config::default().id_pattern);
}

#[test]
fn test_empty_toml_is_default() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_unknown_toml_field_is_rejected() {
    let err = toml::from_str::<Config>("mo_clas = \"x\"\n").unwrap_err();
    assert!(err.to_string().contains("mo_clas"));
}

#[test]
fn test_severity_names() {
    assert_eq!(Severity::Info.to_string(), "INFO");
    assert_eq!(Severity::Warn.as_ref(), "WARN");
    assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
    assert_eq!("INFO".parse::<Severity>().unwrap(), Severity::Info);
    assert!("debug".parse::<Severity>().is_err());
    assert!(Severity::Info < Severity::Warn);
}

#[test]
fn test_log_entry_display() {
    let entry = LogEntry::warn("p", "element 'p' with id 'x' => not removing");
    assert_eq!(
        entry.to_string(),
        "[WARN] element 'p' with id 'x' => not removing"
    );
}

#[test]
fn test_log_entry_json() {
    let entry = LogEntry::info("li", "element 'li' => setting id 'mo_id_1'");
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "severity": "INFO",
            "tag": "li",
            "message": "element 'li' => setting id 'mo_id_1'",
        })
    );
}
