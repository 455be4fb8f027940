//! Npm dependency update automation.
//!
//! This crate implements the CI step that keeps a repository's npm packages
//! current by:
//! - Loading and validating the step's inputs
//! - Running `npm update` in the working directory
//! - Detecting changed manifests via `git status`
//! - Committing them to an update branch and force-pushing it
//! - Opening a pull request against the base branch

pub mod agents;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod logger;
pub mod utils;
pub mod workflow;

pub use config::{RunConfig, Secret};
pub use error::{NduError, Result};
pub use workflow::RunOutcome;
