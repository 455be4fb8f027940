//! Shared fixtures for the integration tests: throwaway git repositories and
//! scripted stand-ins for npm and the GitHub API.
#![allow(dead_code)]

use anyhow::Result;
use ndu::agents::PackageManager;
use ndu::config::{RunConfig, Secret};
use ndu::error::NduError;
use ndu::github::{Forge, PullRequest, PullRequestParams, RepoSlug};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Mutex, Once};
use tempfile::TempDir;

pub const FIXTURE_MANIFEST: &str = r#"{
  "name": "fixture-app",
  "version": "1.0.0",
  "dependencies": {
    "left-pad": "^1.0.0"
  }
}
"#;

pub const FIXTURE_LOCKFILE: &str = r#"{
  "name": "fixture-app",
  "version": "1.0.0",
  "lockfileVersion": 3,
  "packages": {}
}
"#;

/// Keeps `git config --global` writes inside the test environment. Runs once
/// per test binary, before the first git process spawns.
fn redirect_global_git_config() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let path = std::env::temp_dir().join(format!("ndu-test-gitconfig-{}", std::process::id()));
        unsafe {
            std::env::set_var("GIT_CONFIG_GLOBAL", &path);
        }
    });
}

/// Runs git in `dir`, panicking on failure; returns trimmed stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run git {args:?}: {e}"));
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// True when `reference` resolves in `dir`.
pub fn ref_exists(dir: &Path, reference: &str) -> bool {
    Command::new("git")
        .current_dir(dir)
        .args(["rev-parse", "--verify", "--quiet", reference])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// A temporary git repository holding a committed npm project.
/// Automatically cleaned up when dropped.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    /// Creates a repository with the fixture manifests committed on `main`.
    pub fn new() -> Result<Self> {
        redirect_global_git_config();
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();

        git(&path, &["init", "-b", "main"]);
        git(&path, &["config", "user.email", "test@example.com"]);
        git(&path, &["config", "user.name", "Test User"]);

        std::fs::write(path.join("package.json"), FIXTURE_MANIFEST)?;
        std::fs::write(path.join("package-lock.json"), FIXTURE_LOCKFILE)?;
        std::fs::write(path.join("README.md"), "# fixture-app\n")?;
        git(&path, &["add", "."]);
        git(&path, &["commit", "-m", "Initial commit"]);

        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Creates a repository with a bare `origin` remote that already has
    /// `main`. Returns the repo and the remote TempDir (must be kept alive).
    pub fn with_remote() -> Result<(Self, TempDir)> {
        let remote_dir = TempDir::new()?;
        git(remote_dir.path(), &["init", "--bare"]);
        git(remote_dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);

        let local = Self::new()?;
        git(
            &local.path,
            &["remote", "add", "origin", remote_dir.path().to_str().unwrap()],
        );
        git(&local.path, &["push", "-u", "origin", "main"]);

        Ok((local, remote_dir))
    }

    /// Fresh clone of `remote`, the way a CI job checks out the repository.
    pub fn clone_from(remote: &Path) -> Result<Self> {
        redirect_global_git_config();
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();

        git(&path, &["clone", remote.to_str().unwrap(), "."]);
        git(&path, &["config", "user.email", "test@example.com"]);
        git(&path, &["config", "user.name", "Test User"]);

        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_branch(&self) -> String {
        git(&self.path, &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    pub fn last_commit_message(&self) -> String {
        git(&self.path, &["log", "-1", "--pretty=%s"])
    }

    /// Files touched by the last commit.
    pub fn last_commit_files(&self) -> Vec<String> {
        git(&self.path, &["show", "--name-only", "--pretty=format:"])
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// RunConfig pointed at a test repository, bypassing input resolution.
pub fn run_config(project: &Path, branch: &str) -> RunConfig {
    RunConfig {
        base_branch: "main".to_string(),
        target_branch: branch.to_string(),
        head_branch: branch.to_string(),
        working_directory: project.to_string_lossy().into_owned(),
        gh_token: Secret::new("test-token"),
        debug: false,
    }
}

enum UpdateScript {
    /// Rewrite both manifests the way `npm update` does when newer versions
    /// match the declared ranges.
    Bump { version: String },
    /// Leave the project untouched.
    NoChanges,
    /// Fail the way a broken registry would.
    Fail(String),
}

/// Stand-in for npm that edits the manifests instead of resolving packages.
pub struct ScriptedPackageManager {
    project: PathBuf,
    script: UpdateScript,
}

impl ScriptedPackageManager {
    pub fn bumping(project: &Path) -> Self {
        Self::bumping_to(project, "1.3.0")
    }

    pub fn bumping_to(project: &Path, version: &str) -> Self {
        Self {
            project: project.to_path_buf(),
            script: UpdateScript::Bump {
                version: version.to_string(),
            },
        }
    }

    pub fn inert(project: &Path) -> Self {
        Self {
            project: project.to_path_buf(),
            script: UpdateScript::NoChanges,
        }
    }

    pub fn failing(project: &Path, message: &str) -> Self {
        Self {
            project: project.to_path_buf(),
            script: UpdateScript::Fail(message.to_string()),
        }
    }
}

impl PackageManager for ScriptedPackageManager {
    fn update(&self) -> ndu::Result<()> {
        match &self.script {
            UpdateScript::Bump { version } => {
                let manifest = FIXTURE_MANIFEST.replace("^1.0.0", &format!("^{version}"));
                std::fs::write(self.project.join("package.json"), manifest)?;

                let lockfile = FIXTURE_LOCKFILE.replace(
                    "\"packages\": {}",
                    &format!(
                        "\"packages\": {{ \"node_modules/left-pad\": {{ \"version\": \"{version}\" }} }}"
                    ),
                );
                std::fs::write(self.project.join("package-lock.json"), lockfile)?;
                Ok(())
            }
            UpdateScript::NoChanges => Ok(()),
            UpdateScript::Fail(message) => Err(NduError::NpmExecution(message.clone())),
        }
    }
}

/// Forge that records every call and answers with a canned pull request.
#[derive(Default)]
pub struct RecordingForge {
    calls: Mutex<Vec<(RepoSlug, PullRequestParams)>>,
    fail_with: Option<String>,
}

impl RecordingForge {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn recorded(&self) -> Vec<(RepoSlug, PullRequestParams)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Forge for RecordingForge {
    fn open_pull_request(
        &self,
        slug: &RepoSlug,
        params: &PullRequestParams,
    ) -> ndu::Result<PullRequest> {
        self.calls.lock().unwrap().push((slug.clone(), params.clone()));
        if let Some(message) = &self.fail_with {
            return Err(NduError::GitHubApi(message.clone()));
        }
        Ok(PullRequest {
            number: 101,
            html_url: format!("https://github.com/{slug}/pull/101"),
        })
    }
}
