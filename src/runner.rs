//! src/runner.rs

use crate::config::WorklogConfig;
use crate::errors::Result;
use crate::issue::{self, IssueKey};
use crate::policy::{self, VerificationResult};
use crate::tracker::{JiraClient, WorklogSource};

/// Runs one worklog check: branch → issue key → tracker → verdict.
///
/// Every step is awaited before the next one starts and the first error ends
/// the run. Nothing is kept between runs.
pub struct HookRunner {
    source: Box<dyn WorklogSource>,
}

impl HookRunner {
    pub fn new(config: &WorklogConfig) -> Result<Self> {
        Ok(Self::with_source(Box::new(JiraClient::new(config)?)))
    }

    pub fn with_source(source: Box<dyn WorklogSource>) -> Self {
        Self { source }
    }

    /// Checks the branch currently checked out in the working directory.
    pub async fn run(&self) -> Result<(IssueKey, VerificationResult)> {
        let key = issue::extract_issue_key().await?;
        self.verify_key(key).await
    }

    /// Checks a branch by name, without asking git.
    pub async fn verify_branch(&self, branch: &str) -> Result<(IssueKey, VerificationResult)> {
        let key = IssueKey::from_branch(branch)?;
        self.verify_key(key).await
    }

    async fn verify_key(&self, key: IssueKey) -> Result<(IssueKey, VerificationResult)> {
        log::debug!("checking worklog of {key} on {}", self.source.name());
        let summary = self.source.fetch_worklog(&key).await?;
        let result = policy::evaluate(summary);
        log::debug!("{key}: passed = {}", result.passed);
        Ok((key, result))
    }
}
