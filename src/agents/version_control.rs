use crate::error::{NduError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Identity used for the automated commit.
pub const AUTOMATION_USER: &str = "gh-automation";
pub const AUTOMATION_EMAIL: &str = "gh-automation@email.com";

/// Commit message for the manifest update commit.
pub const COMMIT_MESSAGE: &str = "Updating dependencies node packages";

/// Pathspec covering package.json and package-lock.json; git expands the
/// wildcard itself, no shell is involved.
const MANIFEST_PATHSPEC: &str = "package*.json";

/// VersionControlAgent handles Git operations inside the working directory.
///
/// Branch names and the directory itself are validated before this agent is
/// constructed, so every argument handed to git here is plain data.
pub struct VersionControlAgent {
    project_path: PathBuf,
}

impl VersionControlAgent {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Lists manifest files that `npm update` left modified.
    pub fn detect_manifest_changes(&self) -> Result<ManifestChanges> {
        let output = self.run_git(&["status", "-s", MANIFEST_PATHSPEC])?;
        Self::ensure_success(&output, "git status")?;
        Ok(ManifestChanges::from_porcelain(
            String::from_utf8_lossy(&output.stdout).into_owned(),
        ))
    }

    /// Sets the global commit identity to the automation account
    pub fn configure_automation_identity(&self) -> Result<()> {
        let output = self.run_git(&["config", "--global", "user.name", AUTOMATION_USER])?;
        Self::ensure_success(&output, "git config user.name")?;
        let output = self.run_git(&["config", "--global", "user.email", AUTOMATION_EMAIL])?;
        Self::ensure_success(&output, "git config user.email")?;
        Ok(())
    }

    /// Create a new branch for the update
    pub fn create_branch(&self, name: &str) -> Result<()> {
        let output = self.run_git(&["checkout", "-b", name])?;
        Self::ensure_success(&output, "git checkout -b")?;
        Ok(())
    }

    /// Stage the two manifest files and nothing else
    pub fn stage_manifests(&self) -> Result<()> {
        let output = self.run_git(&["add", "package.json", "package-lock.json"])?;
        Self::ensure_success(&output, "git add")?;
        Ok(())
    }

    /// Commit the staged manifests with the standard message
    pub fn commit_updates(&self) -> Result<()> {
        let output = self.run_git(&["commit", "-m", COMMIT_MESSAGE])?;
        Self::ensure_success(&output, "git commit")?;
        Ok(())
    }

    /// Push the branch to origin, setting the upstream. A forced push keeps
    /// re-runs working when the branch already exists on the remote.
    pub fn push_branch(&self, branch: &str, force: bool) -> Result<()> {
        let mut args = vec!["push", "-u", "origin", branch];
        if force {
            args.push("--force");
        }
        let output = self.run_git(&args)?;
        Self::ensure_success(&output, "git push")?;
        Ok(())
    }

    fn run_git(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .current_dir(&self.project_path)
            .args(args)
            .output()
            .map_err(|e| {
                NduError::GitOperation(format!(
                    "Failed to execute git command '{}': {e}",
                    args.join(" ")
                ))
            })
    }

    fn ensure_success(output: &Output, command: &str) -> Result<()> {
        if output.status.success() {
            return Ok(());
        }

        Err(NduError::GitOperation(format!(
            "{} failed: {}",
            command,
            String::from_utf8_lossy(&output.stderr)
        )))
    }
}

/// Porcelain output of `git status -s package*.json`.
#[derive(Debug, Clone, Default)]
pub struct ManifestChanges {
    raw: String,
}

impl ManifestChanges {
    fn from_porcelain(raw: String) -> Self {
        Self { raw }
    }

    /// True when at least one manifest file was modified.
    pub fn any(&self) -> bool {
        !self.raw.trim().is_empty()
    }

    /// Paths of the modified manifests, without the status columns.
    pub fn paths(&self) -> Vec<&str> {
        self.raw
            .lines()
            .filter_map(|line| line.split_whitespace().last())
            .collect()
    }
}
