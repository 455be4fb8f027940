use crate::error::{NduError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// ProjectScannerAgent validates the npm project structure
pub struct ProjectScannerAgent {
    project_path: PathBuf,
}

impl ProjectScannerAgent {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Validates the working directory before any command runs inside it
    pub fn validate(&self) -> Result<ProjectInfo> {
        if !self.project_path.is_dir() {
            return Err(NduError::ProjectValidation(format!(
                "working directory '{}' does not exist",
                self.project_path.display()
            )));
        }

        let manifest_path = self.project_path.join("package.json");
        if !manifest_path.is_file() {
            return Err(NduError::ProjectValidation(format!(
                "package.json not found in '{}'",
                self.project_path.display()
            )));
        }

        // A manifest npm cannot parse should fail here, not halfway through
        // the update.
        let manifest: PackageManifest =
            serde_json::from_str(&std::fs::read_to_string(&manifest_path)?)?;

        let lockfile = self.project_path.join("package-lock.json");
        let lockfile_path = lockfile.is_file().then_some(lockfile);

        // The directory may sit anywhere inside the repository, so look for
        // .git in the ancestors rather than only at the project path.
        let has_git = self
            .project_path
            .ancestors()
            .any(|dir| dir.join(".git").is_dir());

        Ok(ProjectInfo {
            project_path: self.project_path.clone(),
            manifest_path,
            manifest,
            lockfile_path,
            has_git,
        })
    }
}

/// The manifest fields worth reporting; everything else is npm's business.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub project_path: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: PackageManifest,
    /// Present only when package-lock.json already exists; npm creates it on
    /// the first update otherwise.
    pub lockfile_path: Option<PathBuf>,
    pub has_git: bool,
}
