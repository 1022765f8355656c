//! Version-control interaction for tagged releases.
//!
//! The release workflow is a fixed, ordered sequence of discrete operations:
//! stage the changed files, commit, create an annotated tag, push the current
//! branch, push the tag. Each step can fail independently; the report records
//! how far the sequence got.

use crate::error::{IncverError, Result};
use git2::Repository;
use std::fmt;
use std::path::{Path, PathBuf};

/// Remote the release sequence pushes to
pub const RELEASE_REMOTE: &str = "origin";

/// Fixed commit message for version bumps
pub const RELEASE_COMMIT_MESSAGE: &str = "upversion";

/// One step of the release sequence, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStep {
    Staged,
    Committed,
    Tagged,
    PushedBranch,
    PushedTag,
}

impl fmt::Display for ReleaseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseStep::Staged => "staged changed files",
            ReleaseStep::Committed => "committed",
            ReleaseStep::Tagged => "created tag",
            ReleaseStep::PushedBranch => "pushed branch",
            ReleaseStep::PushedTag => "pushed tag",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of the release sequence: the completed prefix, plus the failing
/// step and its error when the sequence stopped early.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseReport {
    pub completed: Vec<ReleaseStep>,
    pub failed: Option<(ReleaseStep, String)>,
}

impl ReleaseReport {
    fn new() -> Self {
        ReleaseReport {
            completed: Vec::new(),
            failed: None,
        }
    }

    /// Record one step's result; returns whether the sequence may continue
    fn record(&mut self, step: ReleaseStep, result: Result<()>) -> bool {
        match result {
            Ok(()) => {
                self.completed.push(step);
                true
            }
            Err(e) => {
                self.failed = Some((step, e.to_string()));
                false
            }
        }
    }

    /// Whether every step of the sequence completed
    pub fn succeeded(&self) -> bool {
        self.failed.is_none()
    }
}

/// Wrapper around a git2 Repository for the release sequence.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Whether the given directory is inside a git working tree
    pub fn is_vcs(root: &Path) -> bool {
        Repository::discover(root).is_ok()
    }

    /// Open the repository containing `root`
    pub fn open(root: &Path) -> Result<Self> {
        let repo = Repository::discover(root)
            .map_err(|e| IncverError::release(format!("not a git repository: {}", e)))?;
        Ok(GitRepo { repo })
    }

    /// Run the full release sequence for a new version.
    ///
    /// `files` are the changed files to stage; `version` is the new version
    /// string (the tag becomes `v<version>`).
    pub fn publish(&self, files: &[PathBuf], version: &str) -> ReleaseReport {
        let tag_name = format!("v{}", version);
        let tag_message = format!("Version {}", version);
        let mut report = ReleaseReport::new();

        if !report.record(ReleaseStep::Staged, self.stage(files)) {
            return report;
        }
        if !report.record(ReleaseStep::Committed, self.commit(RELEASE_COMMIT_MESSAGE)) {
            return report;
        }
        if !report.record(
            ReleaseStep::Tagged,
            self.tag_annotated(&tag_name, &tag_message),
        ) {
            return report;
        }
        if !report.record(ReleaseStep::PushedBranch, self.push_branch(RELEASE_REMOTE)) {
            return report;
        }
        report.record(
            ReleaseStep::PushedTag,
            self.push_tag(&tag_name, RELEASE_REMOTE),
        );
        report
    }

    /// Stage exactly the given files
    pub fn stage(&self, files: &[PathBuf]) -> Result<()> {
        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| IncverError::release("repository has no working directory"))?
            .canonicalize()?;

        let mut index = self.repo.index()?;
        for file in files {
            let absolute = file.canonicalize()?;
            let relative = absolute.strip_prefix(&workdir).map_err(|_| {
                IncverError::release(format!("{} is outside the repository", file.display()))
            })?;
            index.add_path(relative)?;
        }
        index.write()?;
        Ok(())
    }

    /// Commit the staged index on HEAD
    pub fn commit(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        Ok(())
    }

    /// Create an annotated tag on the current HEAD commit
    pub fn tag_annotated(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel(git2::ObjectType::Commit)?;
        let signature = self.repo.signature()?;
        self.repo.tag(name, &head, &signature, message, false)?;
        Ok(())
    }

    /// Push the current branch to a remote
    pub fn push_branch(&self, remote_name: &str) -> Result<()> {
        let branch = self.current_branch()?;
        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);
        self.push_refspec(remote_name, &refspec)
    }

    /// Push a tag to a remote
    pub fn push_tag(&self, tag_name: &str, remote_name: &str) -> Result<()> {
        let refspec = format!("refs/tags/{}", tag_name);
        self.push_refspec(remote_name, &refspec)
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| IncverError::release("HEAD is not on a branch"))
    }

    fn push_refspec(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| IncverError::release(format!("no remote named '{}'", remote_name)))?;

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(remote_callbacks());
        remote.push(&[refspec], Some(&mut push_options))?;
        Ok(())
    }
}

/// Credential callbacks for push: SSH keys from ~/.ssh, then the SSH agent,
/// then default credentials.
fn remote_callbacks() -> git2::RemoteCallbacks<'static> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                let key_path = PathBuf::from(&home).join(".ssh").join(key);
                if key_path.exists() {
                    if let Ok(cred) = git2::Cred::ssh_key(username, None, &key_path, None) {
                        return Ok(cred);
                    }
                }
            }

            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });
    callbacks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_step_display() {
        assert_eq!(ReleaseStep::Staged.to_string(), "staged changed files");
        assert_eq!(ReleaseStep::PushedTag.to_string(), "pushed tag");
    }

    #[test]
    fn test_report_records_completed_prefix() {
        let mut report = ReleaseReport::new();
        assert!(report.record(ReleaseStep::Staged, Ok(())));
        assert!(report.record(ReleaseStep::Committed, Ok(())));
        assert!(!report.record(
            ReleaseStep::Tagged,
            Err(IncverError::release("tag exists"))
        ));

        assert_eq!(
            report.completed,
            vec![ReleaseStep::Staged, ReleaseStep::Committed]
        );
        let (step, message) = report.failed.clone().unwrap();
        assert_eq!(step, ReleaseStep::Tagged);
        assert!(message.contains("tag exists"));
        assert!(!report.succeeded());
    }

    #[test]
    fn test_report_success() {
        let mut report = ReleaseReport::new();
        report.record(ReleaseStep::Staged, Ok(()));
        assert!(report.succeeded());
    }

    #[test]
    fn test_is_vcs_outside_repository() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(!GitRepo::is_vcs(dir.path()));
    }
}
