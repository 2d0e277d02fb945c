//! src/git.rs

use crate::errors::{Result, WorklogError};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use tokio::process::Command;

// --- Data Structures ---

/// One line of `git branch` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub is_current: bool,
}

// --- Public API ---

async fn spawn_git(args: &[&str]) -> Result<Output> {
    Command::new("git")
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| WorklogError::Git(format!("failed to execute git: {e}")))
}

pub async fn run_git_command(args: &[&str]) -> Result<String> {
    let output = spawn_git(args).await?;

    if output.status.success() {
        String::from_utf8(output.stdout)
            .map_err(|_| WorklogError::Git("git output is not valid UTF-8".to_string()))
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(WorklogError::Git(format!(
            "`git {}` exited with {}:\n{}",
            args.join(" "),
            output.status,
            stderr.trim()
        )))
    }
}

pub async fn check_is_git_repo() -> bool {
    run_git_command(&["rev-parse", "--is-inside-work-tree"])
        .await
        .is_ok()
}

pub async fn list_branches() -> Result<Vec<Branch>> {
    let output = run_git_command(&["branch", "--no-color"]).await?;
    Ok(parse_branch_listing(&output))
}

/// 当前分支在 `git branch` 输出里以 "* " 开头
pub fn parse_branch_listing(output: &str) -> Vec<Branch> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.strip_prefix('*') {
            Some(rest) => Branch {
                name: rest.trim().to_string(),
                is_current: true,
            },
            // "+ " 表示在其他 worktree 中检出
            None => Branch {
                name: line.trim().trim_start_matches("+ ").to_string(),
                is_current: false,
            },
        })
        .collect()
}

pub async fn current_branch() -> Result<String> {
    let branches = list_branches().await?;
    branches
        .into_iter()
        .find(|b| b.is_current)
        .map(|b| b.name)
        .ok_or(WorklogError::NoCurrentBranch)
}

pub async fn get_git_dir() -> Result<PathBuf> {
    let output = run_git_command(&["rev-parse", "--git-dir"]).await?;
    Ok(PathBuf::from(output.trim()))
}

/// Reads every `<section>.*` key from the repository-local git config.
///
/// Keys come back without the section prefix and lowercased, the way git
/// itself normalises them. A section with no keys yields an empty map.
pub async fn read_local_config_section(section: &str) -> Result<BTreeMap<String, String>> {
    let pattern = format!("^{}\\.", regex::escape(section));
    let output = spawn_git(&["config", "--local", "--get-regexp", &pattern]).await?;

    // git config 没有匹配项时返回 1
    match output.status.code() {
        Some(0) => {}
        Some(1) => return Ok(BTreeMap::new()),
        _ => {
            return Err(WorklogError::Git(format!(
                "could not read git config: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_config_listing(section, &stdout))
}

pub async fn set_local_config(key: &str, value: &str) -> Result<()> {
    run_git_command(&["config", "--local", key, value]).await?;
    Ok(())
}

// --- Helper Functions ---

fn parse_config_listing(section: &str, output: &str) -> BTreeMap<String, String> {
    let prefix = format!("{}.", section.to_lowercase());
    output
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(' ').unwrap_or((line, ""));
            key.to_lowercase()
                .strip_prefix(&prefix)
                .map(|k| (k.to_string(), value.to_string()))
        })
        .collect()
}
