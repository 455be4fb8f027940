use thiserror::Error;

#[derive(Error, Debug)]
pub enum NduError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Project validation failed: {0}")]
    ProjectValidation(String),

    #[error("npm execution failed: {0}")]
    NpmExecution(String),

    #[error("Git operation failed: {0}")]
    GitOperation(String),

    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NduError>;
