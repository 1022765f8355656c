// tests/config_test.rs
use incver::config::{Config, SOURCE_ORDER};
use incver::IncverError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_source_order() {
    assert_eq!(
        SOURCE_ORDER,
        ["pyproject.toml", "setup.cfg", ".incver.yml", ".incver.yaml"]
    );
}

#[test]
fn test_resolve_from_setup_cfg() {
    // pyproject.toml absent, setup.cfg present with a tool section
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("setup.cfg"),
        concat!(
            "[metadata]\n",
            "name = demo\n",
            "\n",
            "[tool:incver]\n",
            "current_version = 1.2.3\n",
        ),
    )
    .unwrap();

    let config = Config::resolve(dir.path()).unwrap();
    assert_eq!(config.current_version, "1.2.3");
    assert_eq!(config.config_file, dir.path().join("setup.cfg"));
}

#[test]
fn test_resolve_prefers_pyproject_over_setup_cfg() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("pyproject.toml"),
        "[project]\nname = \"demo\"\nversion = \"4.5.6\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("setup.cfg"),
        "[tool:incver]\ncurrent_version = 1.0.0\n",
    )
    .unwrap();

    let config = Config::resolve(dir.path()).unwrap();
    assert_eq!(config.current_version, "4.5.6");
    assert_eq!(config.config_file, dir.path().join("pyproject.toml"));
}

#[test]
fn test_resolve_from_yaml_dotfiles() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".incver.yaml"),
        "current_version: \"0.9.0\"\n",
    )
    .unwrap();

    let config = Config::resolve(dir.path()).unwrap();
    assert_eq!(config.current_version, "0.9.0");
    assert_eq!(config.config_file, dir.path().join(".incver.yaml"));

    // The .yml spelling takes priority over .yaml
    fs::write(
        dir.path().join(".incver.yml"),
        "current_version: \"0.9.5\"\n",
    )
    .unwrap();
    let config = Config::resolve(dir.path()).unwrap();
    assert_eq!(config.current_version, "0.9.5");
    assert_eq!(config.config_file, dir.path().join(".incver.yml"));
}

#[test]
fn test_resolve_overrides_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("pyproject.toml"),
        concat!(
            "[tool.incver]\n",
            "current_version = \"1.0.0\"\n",
            "source = \"demo\"\n",
            "versioned = [\"README.rst\", \"demo/about.py\"]\n",
        ),
    )
    .unwrap();

    let config = Config::resolve(dir.path()).unwrap();
    assert_eq!(config.source.as_deref(), Some("demo"));
    assert_eq!(
        config.versioned,
        vec!["README.rst".to_string(), "demo/about.py".to_string()]
    );
}

#[test]
fn test_resolve_templates_recognize_dialects() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".incver.yml"),
        "current_version: \"1.2.3\"\n",
    )
    .unwrap();

    let config = Config::resolve(dir.path()).unwrap();
    let templates = &config.templates;
    assert!(templates.version_eq.is_match("version = \"1.2.3\""));
    assert!(templates.version_dunder.is_match("__version__ = '1.2.3'"));
    assert!(templates
        .version_js
        .is_match("export const version = \"1.2.3\""));
    assert!(templates.version_yml.is_match("version: 1.2.3"));
    assert!(templates.version_json.is_match("\"version\": \"1.2.3\""));
}

#[test]
fn test_resolve_empty_root_fails_with_config_missing() {
    let dir = TempDir::new().unwrap();
    match Config::resolve(dir.path()) {
        Err(IncverError::ConfigMissing(_)) => {}
        other => panic!("expected ConfigMissing, got {:?}", other.map(|c| c.current_version)),
    }
}
