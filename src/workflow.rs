use crate::agents::{NpmExecutionAgent, PackageManager, ProjectScannerAgent, VersionControlAgent};
use crate::config::RunConfig;
use crate::error::Result;
use crate::github::{Forge, GitHubClient, PullRequestParams, RepoSlug};
use crate::logger;
use colored::Colorize;

/// What a run did, for the caller's final message and exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// npm left the manifests untouched; nothing was committed or pushed.
    UpToDate,
    /// The update branch was pushed and a pull request opened.
    PullRequestOpened { number: u64, url: String },
    /// Updates were found but publishing was skipped on request. The local
    /// checkout keeps the updated manifests.
    DryRun,
}

/// Execute the update workflow against the real npm binary and GitHub API.
pub fn execute_run(config: &RunConfig, dry_run: bool) -> Result<RunOutcome> {
    let package_manager = NpmExecutionAgent::new(&config.working_directory);
    let forge = GitHubClient::new(config.gh_token.clone())?;
    let slug = RepoSlug::from_env()?;
    execute_run_with(config, &package_manager, &forge, &slug, dry_run)
}

/// Update workflow with the package manager and code host behind seams.
pub fn execute_run_with(
    config: &RunConfig,
    package_manager: &dyn PackageManager,
    forge: &dyn Forge,
    slug: &RepoSlug,
    dry_run: bool,
) -> Result<RunOutcome> {
    logger::info(&"Starting npm dependency update process...".cyan().bold().to_string());
    logger::info(&format!("base branch is {}", config.base_branch));
    logger::info(&format!("target branch is {}", config.target_branch));
    logger::debug(&format!("head branch is {}", config.head_branch));
    logger::info(&format!("working directory is {}", config.working_directory));

    // Step 1: Validate project structure
    logger::info(&"1. Validating project structure...".yellow().to_string());
    let scanner = ProjectScannerAgent::new(&config.working_directory);
    let project_info = scanner.validate()?;
    if let Some(name) = &project_info.manifest.name {
        logger::debug(&format!("found package '{name}'"));
    }
    if project_info.lockfile_path.is_none() {
        logger::info(
            &"⚠ package-lock.json not found; npm will create it"
                .yellow()
                .to_string(),
        );
    }
    logger::info(&"✓ Project structure is valid".green().to_string());

    // Step 2: Update packages
    logger::info(&"2. Updating npm packages...".yellow().to_string());
    package_manager.update()?;
    logger::info(&"✓ npm update completed".green().to_string());

    // Step 3: Detect manifest changes
    logger::info(&"3. Checking for manifest changes...".yellow().to_string());
    let git_agent = VersionControlAgent::new(&config.working_directory);
    let changes = git_agent.detect_manifest_changes()?;

    if !changes.any() {
        logger::info("No updates available.");
        return Ok(RunOutcome::UpToDate);
    }

    logger::info("There are updates available.");
    logger::debug(&format!("modified manifests: {}", changes.paths().join(", ")));

    if dry_run {
        logger::info(
            &"Dry run: skipping branch creation, commit, push, and pull request"
                .yellow()
                .to_string(),
        );
        return Ok(RunOutcome::DryRun);
    }

    // Step 4: Commit to the update branch and push
    logger::info(&"4. Publishing the update branch...".yellow().to_string());
    git_agent.configure_automation_identity()?;
    git_agent.create_branch(&config.head_branch)?;
    git_agent.stage_manifests()?;
    git_agent.commit_updates()?;
    git_agent.push_branch(&config.head_branch, true)?;
    logger::info(
        &format!("✓ Changes pushed to branch: {}", config.head_branch)
            .green()
            .to_string(),
    );

    // Step 5: Open the pull request
    logger::info(&"5. Creating the pull request...".yellow().to_string());
    let params = PullRequestParams::manifest_update(&config.base_branch, &config.head_branch);
    let pr = match forge.open_pull_request(slug, &params) {
        Ok(pr) => pr,
        Err(e) => {
            logger::error("Something went wrong while creating the PR. Check logs below.");
            return Err(e);
        }
    };

    logger::info(
        &format!("✨ Opened pull request #{}: {}", pr.number, pr.html_url)
            .green()
            .bold()
            .to_string(),
    );

    Ok(RunOutcome::PullRequestOpened {
        number: pr.number,
        url: pr.html_url,
    })
}

/// Pre-flight check: resolve and validate inputs and the project structure
/// without running npm or touching the repository.
pub fn execute_validate(config: &RunConfig) -> Result<()> {
    logger::info(&"Validating inputs and project structure...".cyan().bold().to_string());
    logger::debug(&format!("base branch is {}", config.base_branch));
    logger::debug(&format!("target branch is {}", config.target_branch));
    logger::debug(&format!("head branch is {}", config.head_branch));
    logger::debug(&format!("working directory is {}", config.working_directory));

    let scanner = ProjectScannerAgent::new(&config.working_directory);
    let project_info = scanner.validate()?;

    if let Some(name) = &project_info.manifest.name {
        logger::info(&format!("Found package '{name}'"));
    }
    if project_info.lockfile_path.is_none() {
        logger::info(
            &"⚠ package-lock.json not found; npm will create it"
                .yellow()
                .to_string(),
        );
    }
    if !project_info.has_git {
        logger::info(
            &"⚠ No git repository found above the working directory"
                .yellow()
                .to_string(),
        );
    }

    logger::info(&"✓ Inputs and project structure are valid".green().to_string());
    Ok(())
}
