use crate::error::{NduError, Result};
use std::fmt;

const DEFAULT_API_URL: &str = "https://api.github.com";

/// "owner/repo" pair identifying the repository the runner checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parses the `owner/repo` form that GITHUB_REPOSITORY carries.
    pub fn parse(value: &str) -> Result<Self> {
        match value.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self::new(owner, repo))
            }
            _ => Err(NduError::InvalidInput(format!(
                "GITHUB_REPOSITORY must look like 'owner/repo', got '{value}'"
            ))),
        }
    }

    /// Reads the slug the Actions runner exports for the checked-out repo.
    pub fn from_env() -> Result<Self> {
        let value = std::env::var("GITHUB_REPOSITORY")
            .map_err(|_| NduError::InvalidInput("GITHUB_REPOSITORY is not set".to_string()))?;
        Self::parse(&value)
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Base URL of the REST API. GITHUB_API_URL points at the local instance on
/// GitHub Enterprise runners.
pub fn api_base_url() -> String {
    std::env::var("GITHUB_API_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
