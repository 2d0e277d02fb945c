use crate::config::{self, HookType};
use crate::git;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, PartialEq)]
pub enum HookStatus {
    NotInstalled,
    InstalledByUs,
    InstalledByOther,
}

#[derive(Debug, PartialEq)]
pub enum InstallOutcome {
    Created,
    Appended,
    AlreadyPresent,
}

const HOOK_MARKER: &str = "worklog-hook check";

fn hook_command(hook_type: HookType) -> &'static str {
    if hook_type.blocks_operation() {
        "worklog-hook check"
    } else {
        "worklog-hook check --warn-only"
    }
}

fn hook_script(hook_type: HookType) -> String {
    format!(
        "#!/bin/sh\n\
         # {hook_type} hook for worklog-hook\n\
         # Verifies that time is logged on the Jira issue of the current branch\n\
         \n\
         {}\n",
        hook_command(hook_type)
    )
}

async fn get_hook_path(hook_type: HookType) -> Result<PathBuf> {
    let git_dir = git::get_git_dir().await?;
    Ok(git_dir.join("hooks").join(hook_type.as_str()))
}

pub async fn check_hook_status_at(hook_path: &Path) -> Result<HookStatus> {
    if !hook_path.exists() {
        return Ok(HookStatus::NotInstalled);
    }

    let content = fs::read_to_string(hook_path).await?;

    if content.contains(HOOK_MARKER) {
        Ok(HookStatus::InstalledByUs)
    } else {
        Ok(HookStatus::InstalledByOther)
    }
}

pub async fn install_hook_at(hook_path: &Path, hook_type: HookType) -> Result<InstallOutcome> {
    let hooks_dir = hook_path
        .parent()
        .context("Failed to get hooks directory from path")?;

    if !hooks_dir.exists() {
        fs::create_dir_all(hooks_dir)
            .await
            .context("Failed to create hooks directory")?;
    }

    match check_hook_status_at(hook_path).await? {
        HookStatus::InstalledByUs => return Ok(InstallOutcome::AlreadyPresent),
        HookStatus::InstalledByOther => {
            // 追加命令到现有钩子
            let mut content = fs::read_to_string(hook_path).await?;
            if !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(&format!(
                "\n# Added by worklog-hook\n{}\n",
                hook_command(hook_type)
            ));
            fs::write(hook_path, content)
                .await
                .with_context(|| format!("Failed to append to {hook_type} hook"))?;
            return Ok(InstallOutcome::Appended);
        }
        HookStatus::NotInstalled => {}
    }

    fs::write(hook_path, hook_script(hook_type))
        .await
        .with_context(|| format!("Failed to write {hook_type} hook"))?;

    #[cfg(unix)]
    {
        let mut perms = fs::metadata(hook_path).await?.permissions();
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(0o755);
        fs::set_permissions(hook_path, perms)
            .await
            .context("Failed to set hook permissions")?;
    }

    Ok(InstallOutcome::Created)
}

pub async fn handle_install_hook() -> Result<()> {
    let hook_type = config::load_config()
        .await
        .context("The hook type is read from the worklog configuration")?
        .hook_type;
    let hook_path = get_hook_path(hook_type).await?;

    match install_hook_at(&hook_path, hook_type).await? {
        InstallOutcome::Created => println!(
            "{} {}",
            format!("✅ {hook_type} hook installed at:").green(),
            hook_path.display()
        ),
        InstallOutcome::Appended => println!(
            "{}",
            format!("✅ Added the worklog check to the existing {hook_type} hook.").green()
        ),
        InstallOutcome::AlreadyPresent => {
            println!("✅ The {hook_type} hook already runs the worklog check.")
        }
    }

    Ok(())
}
