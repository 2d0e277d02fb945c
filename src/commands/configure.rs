use crate::config::{self, ApiVersion, HookType, WorklogConfig};
use crate::git;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::time::Duration;

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"\w+@\w+").unwrap();
}

fn validate_email(email: &str) -> std::result::Result<(), String> {
    if !email.is_empty() && EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err("Please enter a valid email address".to_string())
    }
}

fn validate_url(url: &str) -> std::result::Result<(), String> {
    if url.starts_with("https://") {
        Ok(())
    } else {
        Err("The Jira url must start with https://".to_string())
    }
}

/// Index of the stored option, so a reconfiguration starts on it.
fn default_index<T: Copy>(options: &[T], stored: Option<T>) -> usize
where
    T: PartialEq,
{
    stored
        .and_then(|s| options.iter().position(|o| *o == s))
        .unwrap_or(0)
}

fn prompt_config(previous: &BTreeMap<String, String>) -> Result<WorklogConfig> {
    let theme = ColorfulTheme::default();

    let mut email_prompt = Input::<String>::with_theme(&theme)
        .with_prompt("Jira login email")
        .validate_with(|input: &String| validate_email(input));
    if let Some(email) = previous.get("email") {
        email_prompt = email_prompt.default(email.clone());
    }
    let email = email_prompt.interact_text()?;

    // 密码不回显，也不使用旧值作为默认值
    let password = Password::with_theme(&theme)
        .with_prompt("Jira login password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let hook_labels: Vec<&str> = HookType::ALL.iter().map(HookType::label).collect();
    let hook_index = Select::with_theme(&theme)
        .with_prompt("What type of git hook you want to use for worklog?")
        .items(&hook_labels[..])
        .default(default_index(
            &HookType::ALL,
            previous.get("type").and_then(|t| HookType::parse(t)),
        ))
        .interact()?;

    let mut url_prompt = Input::<String>::with_theme(&theme)
        .with_prompt("Full Jira board url")
        .validate_with(|input: &String| validate_url(input));
    if let Some(url) = previous.get("url") {
        url_prompt = url_prompt.default(url.clone());
    }
    let url = url_prompt.interact_text()?;

    let version_labels: Vec<&str> = ApiVersion::ALL.iter().map(ApiVersion::label).collect();
    let version_index = Select::with_theme(&theme)
        .with_prompt("Which Jira REST API version your team is using?")
        .items(&version_labels[..])
        .default(default_index(
            &ApiVersion::ALL,
            previous.get("version").and_then(|v| ApiVersion::parse(v)),
        ))
        .interact()?;

    Ok(WorklogConfig {
        email: email.trim().to_string(),
        password,
        hook_type: HookType::ALL[hook_index],
        url: url.trim().trim_end_matches('/').to_string(),
        version: ApiVersion::ALL[version_index],
        timeout: Duration::from_secs(10),
    })
}

pub async fn handle_configure(reconfigure: bool) -> Result<()> {
    if !git::check_is_git_repo().await {
        bail!("The current directory is not a git repository.");
    }

    let previous = config::read_entries()
        .await
        .context("Failed to read the existing worklog configuration")?;

    if !previous.is_empty() && !reconfigure {
        println!(
            "{}",
            "Configuration for worklog has already been created. To change it, run `worklog-hook configure --reconfigure`."
                .yellow()
        );
        return Ok(());
    }

    let new_config = prompt_config(&previous)?;
    config::save_config(&new_config)
        .await
        .context("Failed to write the worklog configuration to git config")?;

    println!("{}", "worklog hook was configured successfully".green());
    println!(
        "Run `worklog-hook install-hook` to enable the {} hook.",
        new_config.hook_type
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_at_between_words() {
        assert!(validate_email("dev@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("dev.example.com").is_err());
        assert!(validate_email("@example").is_err());
    }

    #[test]
    fn url_must_be_https() {
        assert!(validate_url("https://jira.example.com").is_ok());
        assert!(validate_url("http://jira.example.com").is_err());
        assert!(validate_url("jira.example.com").is_err());
    }

    #[test]
    fn select_defaults_follow_stored_value() {
        assert_eq!(default_index(&HookType::ALL, Some(HookType::PrePush)), 2);
        assert_eq!(default_index(&ApiVersion::ALL, Some(ApiVersion::V3)), 1);
        assert_eq!(default_index(&HookType::ALL, None), 0);
    }
}
