pub mod check;
pub mod configure;
pub mod install_hook;

use clap::{Parser, Subcommand};

/// Blocks commits and pushes until time is logged on the branch's Jira issue
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Verify that time is logged on the issue named by the current branch
    #[command(alias = "c")]
    Check {
        /// Only warn when no time is logged; used by the post-commit hook
        #[arg(long)]
        warn_only: bool,

        /// Check this branch name instead of the checked-out branch
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Store Jira credentials and hook preferences in the local git config
    #[command(alias = "config")]
    Configure {
        /// Run the wizard again even if a configuration already exists
        #[arg(short, long)]
        reconfigure: bool,
    },

    /// Install the configured git hook into this repository
    InstallHook,
}
