//! Orchestration of the `version` and `upversion` operations.
//!
//! Both operations return a report; rendering happens in the CLI layer.

use crate::config::Config;
use crate::error::Result;
use crate::files::{self, Outcome};
use crate::git_ops::{GitRepo, ReleaseReport};
use crate::version::{BumpKind, Version};
use crate::warnings::UpdateWarning;
use std::path::{Path, PathBuf};

/// Options for one upversion run
#[derive(Debug, Clone, Copy, Default)]
pub struct UpversionOptions {
    /// Which component to increment
    pub bump: BumpKind,
    /// Create and push a tag after rewriting files
    pub tag: bool,
}

/// Everything one upversion run did
#[derive(Debug, Clone)]
pub struct UpversionReport {
    /// Version string before the bump, exactly as found in the config source
    pub previous_version: String,
    /// Version string written into the candidate files
    pub new_version: String,
    /// Files actually rewritten, in path order
    pub changed: Vec<PathBuf>,
    /// Non-fatal issues collected along the way
    pub warnings: Vec<UpdateWarning>,
    /// Release sequence outcome, present only when tagging ran
    pub release: Option<ReleaseReport>,
}

/// Resolve the project's current version string
pub fn current_version(root: &Path) -> Result<String> {
    Ok(Config::resolve(root)?.current_version)
}

/// Bump the project version and rewrite it across all candidate files.
///
/// The release sequence runs only when a tag was requested, at least one file
/// changed, and the root is inside a git working tree. The new version is
/// returned even when nothing changed, so the caller can see what was
/// attempted.
pub fn upversion(root: &Path, options: &UpversionOptions) -> Result<UpversionReport> {
    let config = Config::resolve(root)?;
    let current = Version::parse(&config.current_version)?;
    let old_version = config.current_version.clone();
    let new_version = current.bump(options.bump).to_string();

    let mut warnings = Vec::new();

    let mut candidates = files::candidate_files(root, &config.source_dir(root));
    match files::declared_versioned(root) {
        Ok(extra) => candidates.extend(extra),
        Err(e) => warnings.push(UpdateWarning::FileError {
            path: root.join(files::BUILD_MANIFEST),
            message: e.to_string(),
        }),
    }
    for name in &config.versioned {
        candidates.insert(root.join(name));
    }

    let mut changed = Vec::new();
    for (path, outcome) in files::apply(&candidates, &old_version, &new_version) {
        match outcome {
            Ok(Outcome::Changed { duplicate_new }) => {
                if duplicate_new {
                    warnings.push(UpdateWarning::StaleVersion {
                        path: path.clone(),
                        version: new_version.clone(),
                    });
                }
                changed.push(path);
            }
            Ok(Outcome::SkippedAmbiguous { occurrences }) => {
                warnings.push(UpdateWarning::AmbiguousVersion {
                    path,
                    version: old_version.clone(),
                    occurrences,
                });
            }
            Ok(Outcome::NotFound) => {}
            Err(e) => warnings.push(UpdateWarning::FileError {
                path,
                message: e.to_string(),
            }),
        }
    }

    if changed.is_empty() {
        warnings.push(UpdateWarning::NothingChanged {
            version: new_version.clone(),
        });
    }

    let release = if options.tag && !changed.is_empty() && GitRepo::is_vcs(root) {
        Some(GitRepo::open(root)?.publish(&changed, &new_version))
    } else {
        None
    };

    Ok(UpversionReport {
        previous_version: old_version,
        new_version,
        changed,
        warnings,
        release,
    })
}
