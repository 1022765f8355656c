//! Configuration resolution.
//!
//! Probes a fixed, priority-ordered list of config files in the project root,
//! pulls the current version and any recognized overrides out of the first
//! one that exists, and falls back to asking the project's own build entry
//! point for its version when none of them do.

use crate::error::{IncverError, Result};
use crate::templates::{TemplateOverrides, TemplateSet};
use configparser::ini::Ini;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Config files probed in priority order
pub const SOURCE_ORDER: [&str; 4] = ["pyproject.toml", "setup.cfg", ".incver.yml", ".incver.yaml"];

/// Config section consulted in INI and TOML dialects
const TOOL_SECTION: &str = "tool:incver";

/// Package source directory used when no `source` override is given
const DEFAULT_SOURCE_DIR: &str = "src";

/// Recognized override keys, shared by every config dialect.
///
/// This is the full set: the current version, the seven dialect template
/// patterns, the package source directory, and extra versioned files.
/// Unrecognized keys in a config file are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Overrides {
    /// Authoritative current version string
    pub current_version: Option<String>,
    /// Numeric version pattern every dialect template derives from
    pub version_re: Option<String>,
    /// Quoted-string pattern (`$VERSION` placeholder)
    pub version_str: Option<String>,
    /// Assignment form, `version = "..."`
    pub version_eq: Option<String>,
    /// Dunder form, `__version__ = "..."`
    pub version_dunder: Option<String>,
    /// JS export form, `export const version = "..."`
    pub version_js: Option<String>,
    /// YAML key form, `version: ...`
    pub version_yml: Option<String>,
    /// JSON key form, `"version": "..."`
    pub version_json: Option<String>,
    /// Package source directory, relative to the project root
    pub source: Option<String>,
    /// Extra version-bearing files, relative to the project root
    pub versioned: Option<Vec<String>>,
}

impl Overrides {
    fn template_overrides(&self) -> TemplateOverrides {
        TemplateOverrides {
            version_re: self.version_re.clone(),
            version_str: self.version_str.clone(),
            version_eq: self.version_eq.clone(),
            version_dunder: self.version_dunder.clone(),
            version_js: self.version_js.clone(),
            version_yml: self.version_yml.clone(),
            version_json: self.version_json.clone(),
        }
    }
}

/// Resolved configuration for one invocation. Immutable after `resolve`.
#[derive(Debug, Clone)]
pub struct Config {
    /// The current version according to the config source
    pub current_version: String,
    /// The file that determined the current version
    pub config_file: PathBuf,
    /// Package source directory override
    pub source: Option<String>,
    /// Extra versioned files declared in the config
    pub versioned: Vec<String>,
    /// Dialect regexes, built once per instance
    pub templates: TemplateSet,
}

impl Config {
    /// Resolve configuration for the given project root.
    ///
    /// Probes `SOURCE_ORDER` for the first existing file; when none exists or
    /// the matched file carries no version, `python setup.py --version` is the
    /// fallback source. Fails with `ConfigMissing` when that also fails.
    pub fn resolve(root: &Path) -> Result<Self> {
        for name in SOURCE_ORDER {
            let path = root.join(name);
            if !path.is_file() {
                continue;
            }

            let overrides = match name {
                "pyproject.toml" => read_pyproject(&path)?,
                "setup.cfg" => read_setup_cfg(&path)?,
                _ => read_yaml(&path)?,
            };

            let current_version = match overrides.current_version.clone() {
                Some(version) => version,
                None => probe_build_version(root).map_err(|e| {
                    IncverError::config_missing(format!(
                        "{} carries no current_version and the build probe failed: {}",
                        path.display(),
                        e
                    ))
                })?,
            };

            let templates = TemplateSet::build(&overrides.template_overrides())?;
            return Ok(Config {
                current_version,
                config_file: path,
                source: overrides.source,
                versioned: overrides.versioned.unwrap_or_default(),
                templates,
            });
        }

        let current_version = probe_build_version(root)?;
        Ok(Config {
            current_version,
            config_file: root.join("setup.py"),
            source: None,
            versioned: Vec::new(),
            templates: TemplateSet::build_default()?,
        })
    }

    /// Absolute package source directory for this project
    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(self.source.as_deref().unwrap_or(DEFAULT_SOURCE_DIR))
    }
}

/// Ask the project's own build entry point for its version
fn probe_build_version(root: &Path) -> Result<String> {
    let output = Command::new("python")
        .args(["setup.py", "--version"])
        .current_dir(root)
        .output()
        .map_err(|e| {
            IncverError::config_missing(format!("cannot run 'python setup.py --version': {}", e))
        })?;

    if !output.status.success() {
        return Err(IncverError::config_missing(
            "'python setup.py --version' exited with failure",
        ));
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() {
        return Err(IncverError::config_missing(
            "'python setup.py --version' reported no version",
        ));
    }
    Ok(version)
}

fn read_pyproject(path: &Path) -> Result<Overrides> {
    let text = fs::read_to_string(path)?;
    let doc: toml::Value = toml::from_str(&text).map_err(|e| {
        IncverError::config_missing(format!("cannot parse {}: {}", path.display(), e))
    })?;

    let mut overrides = match doc.get("tool").and_then(|tool| tool.get("incver")) {
        Some(table) => table.clone().try_into::<Overrides>().map_err(|e| {
            IncverError::config_missing(format!(
                "invalid [tool.incver] in {}: {}",
                path.display(),
                e
            ))
        })?,
        None => Overrides::default(),
    };

    if overrides.current_version.is_none() {
        overrides.current_version = doc
            .get("project")
            .and_then(|project| project.get("version"))
            .and_then(toml::Value::as_str)
            .map(str::to_string);
    }

    Ok(overrides)
}

fn read_setup_cfg(path: &Path) -> Result<Overrides> {
    let mut ini = Ini::new();
    ini.load(path).map_err(IncverError::config_missing)?;

    let get = |key: &str| {
        ini.get(TOOL_SECTION, key)
            .map(|value| strip_quotes(&value).to_string())
    };

    let mut overrides = Overrides {
        current_version: get("current_version"),
        version_re: get("version_re"),
        version_str: get("version_str"),
        version_eq: get("version_eq"),
        version_dunder: get("version_dunder"),
        version_js: get("version_js"),
        version_yml: get("version_yml"),
        version_json: get("version_json"),
        source: get("source"),
        versioned: ini.get(TOOL_SECTION, "versioned").map(|value| {
            value
                .split(',')
                .map(|item| strip_quotes(item).to_string())
                .filter(|item| !item.is_empty())
                .collect()
        }),
    };

    if overrides.current_version.is_none() {
        overrides.current_version = ini
            .get("metadata", "version")
            .map(|value| strip_quotes(&value).to_string());
    }

    Ok(overrides)
}

fn read_yaml(path: &Path) -> Result<Overrides> {
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(Overrides::default());
    }
    serde_yml::from_str(&text).map_err(|e| {
        IncverError::config_missing(format!("cannot parse {}: {}", path.display(), e))
    })
}

/// INI values keep their surrounding quotes; strip one matching pair
fn strip_quotes(value: &str) -> &str {
    let trimmed = value.trim();
    let quoted = trimmed.len() >= 2
        && ((trimmed.starts_with('\'') && trimmed.ends_with('\''))
            || (trimmed.starts_with('"') && trimmed.ends_with('"')));
    if quoted {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}
