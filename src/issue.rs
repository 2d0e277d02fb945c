//! src/issue.rs

use crate::errors::{Result, WorklogError};
use crate::git;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref ISSUE_KEY_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9_]+-[0-9]+").unwrap();
}

/// A Jira issue identifier such as `DN-3815`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueKey(String);

impl IssueKey {
    /// Takes the issue key off the front of a branch name.
    pub fn from_branch(branch: &str) -> Result<Self> {
        ISSUE_KEY_PATTERN
            .find(branch)
            .map(|m| IssueKey(m.as_str().to_string()))
            .ok_or_else(|| WorklogError::BranchNamingConvention {
                branch: branch.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads the checked-out branch and derives its issue key.
pub async fn extract_issue_key() -> Result<IssueKey> {
    let branch = git::current_branch().await?;
    log::debug!("current branch: {branch}");
    IssueKey::from_branch(&branch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_prefix_of_conventional_branch() {
        let key = IssueKey::from_branch("DN-3815-add-login").unwrap();
        assert_eq!(key.as_str(), "DN-3815");
    }

    #[test]
    fn bare_key_is_accepted() {
        assert_eq!(IssueKey::from_branch("ABC-1").unwrap().to_string(), "ABC-1");
    }

    #[test]
    fn stops_at_first_non_digit() {
        let key = IssueKey::from_branch("PROJ-42fix_things-7").unwrap();
        assert_eq!(key.as_str(), "PROJ-42");
    }

    #[test]
    fn rejects_branches_without_key() {
        for branch in [
            "main",
            "feature/x",
            "DN-",
            "-123",
            "feature/DN-12",
            "",
            "DÉV-12-x",
            "DN-١٢٣-x",
        ] {
            match IssueKey::from_branch(branch) {
                Err(WorklogError::BranchNamingConvention { branch: b }) => assert_eq!(b, branch),
                other => panic!("expected naming convention error for {branch:?}, got {other:?}"),
            }
        }
    }
}
