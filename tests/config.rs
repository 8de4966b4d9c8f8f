//! Config file loading tests.

use std::io::Write;

use gadget_catalog::infrastructure::resolve_config_path;
use gadget_catalog::{initialize, CatalogError, Config};

#[test]
fn loads_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
base_url = "http://127.0.0.1:9000/api/"
request_timeout_secs = 5
trace_level = "debug"
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.base_url, "http://127.0.0.1:9000/api/");
    assert_eq!(config.request_timeout_secs, 5);
    assert_eq!(config.trace_level.as_deref(), Some("debug"));

    let catalog = initialize(&config).unwrap();
    assert_eq!(catalog.service().base_url(), "http://127.0.0.1:9000/api");
}

#[test]
fn invalid_toml_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();

    assert!(matches!(Config::from_file(&path), Err(CatalogError::Config(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn explicit_config_path_is_used_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    let resolved = resolve_config_path(path.to_str()).unwrap();
    assert_eq!(resolved, path);
}
