use crate::error::{NduError, Result};
use crate::logger;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

/// Seam between the workflow and the package manager binary. Tests swap the
/// real npm invocation for a scripted stand-in.
pub trait PackageManager: Send + Sync {
    /// Brings every dependency in the manifest to the newest version its
    /// declared range allows, rewriting package.json and package-lock.json.
    fn update(&self) -> Result<()>;
}

/// NpmExecutionAgent executes npm commands with live output streaming
pub struct NpmExecutionAgent {
    project_path: PathBuf,
}

impl NpmExecutionAgent {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Execute an npm command with live output streaming
    fn execute_npm_command(&self, args: &[&str]) -> Result<()> {
        let program = if cfg!(target_os = "windows") {
            "npm.cmd"
        } else {
            "npm"
        };
        logger::info(&format!("Executing: {} {}", program, args.join(" ")));

        let pb = ProgressBar::new_spinner();
        if logger::on_actions() {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("npm {}", args.join(" ")));
        pb.enable_steady_tick(Duration::from_millis(100));

        let mut child = Command::new(program)
            .current_dir(&self.project_path)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| NduError::NpmExecution(format!("Failed to spawn '{program}': {e}")))?;

        // Stream stdout without disturbing the spinner line
        if let Some(stdout) = child.stdout.take() {
            let reader = BufReader::new(stdout);
            for line in reader.lines() {
                if let Ok(line) = line {
                    if pb.is_hidden() {
                        println!("{line}");
                    } else {
                        pb.println(line);
                    }
                }
            }
        }

        let status = child
            .wait()
            .map_err(|e| NduError::NpmExecution(format!("Failed to wait for npm: {e}")))?;
        pb.finish_and_clear();

        if !status.success() {
            return Err(NduError::NpmExecution(format!(
                "npm {} failed with exit code: {}",
                args.join(" "),
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}

impl PackageManager for NpmExecutionAgent {
    fn update(&self) -> Result<()> {
        self.execute_npm_command(&["update"])
    }
}
