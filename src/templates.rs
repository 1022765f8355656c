//! Dialect regex templates for recognizing version strings.
//!
//! Every dialect pattern is derived from one shared numeric version pattern,
//! keeping the set mutually consistent. Construction is a pure function run
//! exactly once per configuration instance.

use crate::error::{IncverError, Result};
use regex::{Regex, RegexBuilder};

/// Numeric version pattern shared by every dialect template
pub const VERSION_PATTERN: &str = r"\d+\.\d+(\.\d+)?";

/// Quoted version string. The regex crate has no backreferences, so the two
/// quote styles are spelled out as an alternation.
const QUOTED_TEMPLATE: &str = r#"('$VERSION'|"$VERSION")"#;

const ASSIGN_TEMPLATE: &str = r"^version\s?=\s?u?$VERSION_STR";
const DUNDER_TEMPLATE: &str = r"^__version__\s?=\s?$VERSION_STR";
const JS_EXPORT_TEMPLATE: &str = r"^export const version = $VERSION_STR";
const YAML_KEY_TEMPLATE: &str = r"version: $VERSION";
const JSON_KEY_TEMPLATE: &str = r#""version":\s?"$VERSION""#;

/// Raw template overrides, substituted before compilation.
///
/// `$VERSION` expands to the numeric version pattern and `$VERSION_STR` to the
/// quoted-string pattern, exactly as in the built-in templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateOverrides {
    pub version_re: Option<String>,
    pub version_str: Option<String>,
    pub version_eq: Option<String>,
    pub version_dunder: Option<String>,
    pub version_js: Option<String>,
    pub version_yml: Option<String>,
    pub version_json: Option<String>,
}

/// Compiled dialect regexes for one configuration instance
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub version_re: Regex,
    pub version_str: Regex,
    pub version_eq: Regex,
    pub version_dunder: Regex,
    pub version_js: Regex,
    pub version_yml: Regex,
    pub version_json: Regex,
}

impl TemplateSet {
    /// Build the template set from the built-in patterns
    pub fn build_default() -> Result<Self> {
        Self::build(&TemplateOverrides::default())
    }

    /// Build the template set, substituting the shared version pattern into
    /// each dialect template exactly once.
    pub fn build(overrides: &TemplateOverrides) -> Result<Self> {
        let version = overrides.version_re.as_deref().unwrap_or(VERSION_PATTERN);

        let quoted = overrides
            .version_str
            .as_deref()
            .unwrap_or(QUOTED_TEMPLATE)
            .replace("$VERSION", version);

        let substitute = |template: &Option<String>, default: &str| -> String {
            template
                .as_deref()
                .unwrap_or(default)
                .replace("$VERSION_STR", &quoted)
                .replace("$VERSION", version)
        };

        Ok(TemplateSet {
            version_re: compile(version)?,
            version_str: compile(&quoted)?,
            version_eq: compile(&substitute(&overrides.version_eq, ASSIGN_TEMPLATE))?,
            version_dunder: compile(&substitute(&overrides.version_dunder, DUNDER_TEMPLATE))?,
            version_js: compile(&substitute(&overrides.version_js, JS_EXPORT_TEMPLATE))?,
            version_yml: compile(&substitute(&overrides.version_yml, YAML_KEY_TEMPLATE))?,
            version_json: compile(&substitute(&overrides.version_json, JSON_KEY_TEMPLATE))?,
        })
    }
}

/// Compile one dialect pattern. Anchors apply per line, matching how version
/// assignments appear inside config and source files.
fn compile(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .map_err(|e| IncverError::config(format!("invalid version pattern '{}': {}", pattern, e)))
}
