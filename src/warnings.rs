use std::fmt;
use std::path::PathBuf;

/// Non-fatal issues raised while rewriting version strings.
/// These are reported to the user but never abort the run.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateWarning {
    /// The new version string was already present before replacement
    StaleVersion { path: PathBuf, version: String },
    /// The old version string occurs too many times to replace safely
    AmbiguousVersion {
        path: PathBuf,
        version: String,
        occurrences: usize,
    },
    /// A candidate file could not be read or written
    FileError { path: PathBuf, message: String },
    /// The bump rewrote no files at all
    NothingChanged { version: String },
}

impl fmt::Display for UpdateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateWarning::StaleVersion { path, version } => {
                write!(
                    f,
                    "new version string '{}' already in file {}",
                    version,
                    path.display()
                )
            }
            UpdateWarning::AmbiguousVersion {
                path,
                version,
                occurrences,
            } => {
                write!(
                    f,
                    "found version string '{}' {} times in {}, skipping",
                    version,
                    occurrences,
                    path.display()
                )
            }
            UpdateWarning::FileError { path, message } => {
                write!(f, "could not update {}: {}", path.display(), message)
            }
            UpdateWarning::NothingChanged { version } => {
                write!(f, "no files changed while bumping to {}", version)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_version_display() {
        let warning = UpdateWarning::StaleVersion {
            path: PathBuf::from("setup.py"),
            version: "1.2.4".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("1.2.4"));
        assert!(msg.contains("setup.py"));
    }

    #[test]
    fn test_ambiguous_version_display() {
        let warning = UpdateWarning::AmbiguousVersion {
            path: PathBuf::from("package.json"),
            version: "1.2.3".to_string(),
            occurrences: 4,
        };
        let msg = warning.to_string();
        assert!(msg.contains("4 times"));
        assert!(msg.contains("skipping"));
    }

    #[test]
    fn test_nothing_changed_display() {
        let warning = UpdateWarning::NothingChanged {
            version: "2.0.0".to_string(),
        };
        assert!(warning.to_string().contains("no files changed"));
    }
}
