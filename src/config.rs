use crate::cli::InputArgs;
use crate::error::{NduError, Result};
use crate::logger;
use crate::utils::validation::{is_valid_branch_name, is_valid_directory_name};
use std::fmt;

/// A value that must never reach log output.
///
/// There is deliberately no `Display` impl; the wrapped string is only
/// reachable through [`Secret::expose`].
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Fully resolved and validated configuration for a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub base_branch: String,
    pub target_branch: String,
    /// Branch used as the pull request head; the target branch unless a
    /// head branch was supplied explicitly.
    pub head_branch: String,
    pub working_directory: String,
    pub gh_token: Secret,
    pub debug: bool,
}

impl RunConfig {
    /// Resolves the full input set for a run; the token is required.
    pub fn resolve(args: &InputArgs) -> Result<Self> {
        Self::resolve_inner(args, true)
    }

    /// Resolves inputs for a pre-flight check. The token stays optional
    /// (masked when present); pre-flight never reaches the network, so a
    /// missing token resolves to an empty placeholder.
    pub fn resolve_preflight(args: &InputArgs) -> Result<Self> {
        Self::resolve_inner(args, false)
    }

    fn resolve_inner(args: &InputArgs, require_token: bool) -> Result<Self> {
        // The token is read and masked before anything else so that no later
        // log line can leak it, not even an error message.
        let token = optional_value("gh-token", args.gh_token.as_deref()).map(|raw| {
            let secret = Secret::new(raw);
            logger::add_mask(secret.expose());
            secret
        });

        if require_token && token.is_none() {
            return Err(missing_input("gh-token"));
        }

        let base_branch = validated_branch(
            "base-branch",
            required_value("base-branch", args.base_branch.as_deref())?,
        )?;
        let target_branch = validated_branch(
            "target-branch",
            required_value("target-branch", args.target_branch.as_deref())?,
        )?;
        let head_branch = match optional_value("head-branch", args.head_branch.as_deref()) {
            Some(value) => validated_branch("head-branch", value)?,
            None => target_branch.clone(),
        };
        let working_directory = validated_directory(required_value(
            "working-directory",
            args.working_directory.as_deref(),
        )?)?;

        let debug = if args.debug {
            true
        } else {
            match optional_value("debug", None) {
                Some(raw) => parse_bool_input("debug", &raw)?,
                None => false,
            }
        };

        Ok(Self {
            base_branch,
            target_branch,
            head_branch,
            working_directory,
            gh_token: token.unwrap_or_else(|| Secret::new(String::new())),
            debug,
        })
    }
}

/// Environment variable candidates for a named input. The CI runner exports
/// `INPUT_<NAME>` with the name uppercased and spaces replaced by
/// underscores; hyphens are preserved. An all-underscore variant is accepted
/// as well for shells that cannot export hyphenated names.
fn input_env_candidates(name: &str) -> Vec<String> {
    let upper = name.to_uppercase().replace(' ', "_");
    let mut keys = vec![format!("INPUT_{upper}")];
    let underscored = upper.replace('-', "_");
    if underscored != upper {
        keys.push(format!("INPUT_{underscored}"));
    }
    keys
}

/// Reads a named input from the environment. Values are trimmed; an empty
/// value counts as absent.
pub fn get_input(name: &str) -> Option<String> {
    for key in input_env_candidates(name) {
        if let Ok(value) = std::env::var(&key) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn optional_value(name: &str, flag: Option<&str>) -> Option<String> {
    flag.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| get_input(name))
}

fn required_value(name: &str, flag: Option<&str>) -> Result<String> {
    optional_value(name, flag).ok_or_else(|| missing_input(name))
}

fn missing_input(name: &str) -> NduError {
    NduError::InvalidInput(format!("Input required and not supplied: {name}"))
}

fn validated_branch(field: &str, value: String) -> Result<String> {
    if !is_valid_branch_name(&value) {
        return Err(NduError::InvalidInput(format!(
            "Invalid {field} name. Branch names should include only characters, numbers, \
             hyphens, underscores, dots, and forward slashes."
        )));
    }
    // The character class alone still admits strings git rejects as refs,
    // and a leading '-' would read as an option to git.
    if value.starts_with('-') || value.contains("..") {
        return Err(NduError::InvalidInput(format!(
            "Invalid {field} name. Branch names cannot start with '-' or contain '..'."
        )));
    }
    Ok(value)
}

fn validated_directory(value: String) -> Result<String> {
    if !is_valid_directory_name(&value) {
        return Err(NduError::InvalidInput(
            "Invalid working directory name. Directory names should include only characters, \
             numbers, hyphens, underscores, and forward slashes."
                .to_string(),
        ));
    }
    Ok(value)
}

fn parse_bool_input(name: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(NduError::InvalidInput(format!(
            "Input '{name}' is not a boolean: '{raw}'"
        ))),
    }
}
