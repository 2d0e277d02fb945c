use crate::config;
use crate::git;
use crate::policy;
use crate::runner::HookRunner;
use anyhow::{bail, Result};
use colored::Colorize;

/// Outcome of a check that got as far as a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
}

/// Runs the hook-time check and prints the report.
///
/// `warn_only` turns a missing worklog into a warning, for hooks that run
/// after the operation and cannot stop it anyway. `branch` overrides the
/// checked-out branch.
pub async fn handle_check(warn_only: bool, branch: Option<String>) -> Result<CheckStatus> {
    if !git::check_is_git_repo().await {
        bail!("The current directory is not a git repository.");
    }

    let config = config::load_config().await?;
    let runner = HookRunner::new(&config)?;
    let (key, result) = match branch {
        Some(branch) => runner.verify_branch(&branch).await?,
        None => runner.run().await?,
    };

    print!("{}", policy::render_report(&key, &result));

    if result.passed {
        return Ok(CheckStatus::Passed);
    }

    if warn_only {
        println!(
            "{}",
            format!("Warning: no time is logged on {key} yet.").yellow()
        );
        Ok(CheckStatus::Passed)
    } else {
        Ok(CheckStatus::Failed)
    }
}
