use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ndu",
    about = "Npm Dependency Update - CI automation that updates npm packages and opens a pull request",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the update step: npm update, commit changed manifests, push, open a PR
    Run(RunArgs),

    /// Check inputs and project structure without touching git or the network
    Validate(InputArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Apply updates but skip branch, commit, push, and pull request
    #[arg(long)]
    pub dry_run: bool,
}

/// Action inputs. Every value may also arrive through the environment using
/// the `INPUT_<NAME>` convention of the invoking CI runner; explicit flags
/// take precedence.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Branch the pull request merges into
    #[arg(long, value_name = "BRANCH")]
    pub base_branch: Option<String>,

    /// Branch to create and push the update to
    #[arg(long, value_name = "BRANCH")]
    pub target_branch: Option<String>,

    /// Branch used as the pull request head (defaults to the target branch)
    #[arg(long, value_name = "BRANCH")]
    pub head_branch: Option<String>,

    /// Directory containing package.json
    #[arg(long, value_name = "DIR")]
    pub working_directory: Option<String>,

    /// Token used to authenticate the pull request creation
    #[arg(long, value_name = "TOKEN")]
    pub gh_token: Option<String>,

    /// Enable verbose debug output
    #[arg(long)]
    pub debug: bool,
}
