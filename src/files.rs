//! In-place version string replacement across candidate files.

use crate::error::{IncverError, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Occurrence counts above this are too risky to replace blindly.
/// Policy constant: two occurrences (e.g. setup.py plus a changelog line) are
/// still replaced wholesale, three or more are skipped.
pub const AMBIGUITY_THRESHOLD: usize = 2;

/// How far into a package manifest the version field is searched for.
/// Dependency pins later in the file must not be touched.
pub const MANIFEST_HEAD_SPAN: usize = 200;

/// Build-tool manifest that may declare extra versioned files
pub const BUILD_MANIFEST: &str = "dkbuild.yml";

/// Well-known version-bearing files relative to the project root
const ROOT_CANDIDATES: &[&str] = &[
    "setup.py",
    "package.json",
    "package.ini",
    "package.yaml",
    "dkbuild.yml",
    "docs/conf.py",
    "src/version.js",
    "js/version.js",
    "styles/index.less",
    "styles/index.scss",
    "less/index.less",
];

/// Version-bearing files relative to the package source directory
const SOURCE_CANDIDATES: &[&str] = &["__init__.py", "_version.py", "package.json"];

/// Per-file result of a replacement attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// File absent, or the old version string does not occur in it
    NotFound,
    /// Replacement performed; `duplicate_new` is set when the new version
    /// string was already present before the rewrite
    Changed { duplicate_new: bool },
    /// The old version string occurs too many times; file left untouched
    SkippedAmbiguous { occurrences: usize },
}

/// Assemble the deduplicated set of candidate files for a project.
///
/// `source_dir` is the package source directory (the `source` config override,
/// `src` by default).
pub fn candidate_files(root: &Path, source_dir: &Path) -> BTreeSet<PathBuf> {
    let mut candidates: BTreeSet<PathBuf> =
        ROOT_CANDIDATES.iter().map(|name| root.join(name)).collect();
    for name in SOURCE_CANDIDATES {
        candidates.insert(source_dir.join(name));
    }
    candidates
}

#[derive(Debug, Deserialize)]
struct BuildManifest {
    package: Option<PackageSection>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    versioned: Option<Vec<String>>,
}

/// Extra versioned files declared under the `package.versioned` key of the
/// build-tool YAML. Missing manifest means no extra files.
pub fn declared_versioned(root: &Path) -> Result<Vec<PathBuf>> {
    let manifest = root.join(BUILD_MANIFEST);
    if !manifest.is_file() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(&manifest)?;
    let parsed: BuildManifest = serde_yml::from_str(&text)
        .map_err(|e| IncverError::config(format!("cannot parse {}: {}", manifest.display(), e)))?;
    Ok(parsed
        .package
        .and_then(|p| p.versioned)
        .unwrap_or_default()
        .into_iter()
        .map(|name| root.join(name))
        .collect())
}

/// Replace the version string `old` with `new` in one file.
///
/// The file is rewritten only for the `Changed` outcome; everything outside
/// the substituted spans is preserved byte-for-byte.
pub fn replace_version(path: &Path, old: &str, new: &str) -> Result<Outcome> {
    if !path.is_file() {
        return Ok(Outcome::NotFound);
    }

    let text = fs::read_to_string(path)?;

    if !text.contains(old) {
        return Ok(Outcome::NotFound);
    }

    let duplicate_new = text.contains(new);

    let occurrences = text.matches(old).count();
    if occurrences > AMBIGUITY_THRESHOLD {
        return Ok(Outcome::SkippedAmbiguous { occurrences });
    }

    let updated = if is_package_manifest(path) {
        // Only the manifest-level version field near the top of the file is
        // fair game; a dependency pinned to the same string further down must
        // survive the rewrite.
        let boundary = head_span_boundary(&text);
        let (head, tail) = text.split_at(boundary);
        if !head.contains(old) {
            return Ok(Outcome::NotFound);
        }
        format!("{}{}", head.replacen(old, new, 1), tail)
    } else {
        text.replace(old, new)
    };

    fs::write(path, updated)?;
    Ok(Outcome::Changed { duplicate_new })
}

/// Apply the replacement to every candidate file.
///
/// Failures are isolated per file; one unreadable candidate never aborts the
/// rest of the set.
pub fn apply(
    files: &BTreeSet<PathBuf>,
    old: &str,
    new: &str,
) -> Vec<(PathBuf, Result<Outcome>)> {
    files
        .iter()
        .map(|path| (path.clone(), replace_version(path, old, new)))
        .collect()
}

fn is_package_manifest(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == "package.json")
}

/// Byte offset of the first char boundary at or past the manifest head span
fn head_span_boundary(text: &str) -> usize {
    text.char_indices()
        .nth(MANIFEST_HEAD_SPAN)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}
