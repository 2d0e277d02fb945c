//! src/errors.rs

use thiserror::Error;

/// Every way a worklog check can end without a verdict.
///
/// None of these are retried. `main` prints them and exits non-zero, so the
/// hook blocks the git operation.
#[derive(Debug, Error)]
pub enum WorklogError {
    #[error("No checked-out branch found in `git branch` output")]
    NoCurrentBranch,

    #[error("Branch name {branch} does not match naming convention (expected e.g. DN-3815-short-description)")]
    BranchNamingConvention { branch: String },

    #[error("Configuration for worklog was not found! To setup one: `worklog-hook configure`")]
    ConfigurationMissing,

    #[error("Invalid worklog configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Git command failed: {0}")]
    Git(String),

    #[error("Could not reach the issue tracker")]
    Transport(#[from] reqwest::Error),

    #[error("Issue tracker returned an unreadable response ({reason})\nRaw body: {body}")]
    MalformedResponse { reason: String, body: String },

    #[error("Issue tracker answered with status {status}\nResponse body: {body}")]
    TrackerApi { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, WorklogError>;
