//! src/config.rs

use crate::errors::{Result, WorklogError};
use crate::git;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::time::Duration;

/// git config section holding every worklog setting.
pub const CONFIG_SECTION: &str = "worklog";

/// Lets the test-suite point the hook at a plain-http mock tracker.
pub const ALLOW_INSECURE_ENV: &str = "WORKLOG_ALLOW_INSECURE_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Jira REST API version used in the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V2,
    V3,
}

impl ApiVersion {
    pub const ALL: [ApiVersion; 2] = [ApiVersion::V2, ApiVersion::V3];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V2 => "2",
            ApiVersion::V3 => "3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApiVersion::V2 => "2 (current stable)",
            ApiVersion::V3 => "3 (experimental)",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value.trim())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which git hook runs the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookType {
    PreCommit,
    PostCommit,
    PrePush,
}

impl HookType {
    pub const ALL: [HookType; 3] = [HookType::PreCommit, HookType::PostCommit, HookType::PrePush];

    /// File name under `.git/hooks`, also the value stored in git config.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookType::PreCommit => "pre-commit",
            HookType::PostCommit => "post-commit",
            HookType::PrePush => "pre-push",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HookType::PreCommit => "pre-commit (terminate operation)",
            HookType::PostCommit => "post-commit (warning only)",
            HookType::PrePush => "pre-push (terminate operation)",
        }
    }

    /// post-commit runs after the commit exists, so it can only warn.
    pub fn blocks_operation(&self) -> bool {
        !matches!(self, HookType::PostCommit)
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value.trim())
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials and preferences read from the local git config.
#[derive(Clone, PartialEq, Eq)]
pub struct WorklogConfig {
    pub email: String,
    pub password: String,
    pub hook_type: HookType,
    /// Jira base url, always without a trailing slash.
    pub url: String,
    pub version: ApiVersion,
    pub timeout: Duration,
}

// 不要把密码打印到日志里
impl fmt::Debug for WorklogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorklogConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("hook_type", &self.hook_type)
            .field("url", &self.url)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl WorklogConfig {
    /// Builds a config from `worklog.*` entries (keys without the section).
    ///
    /// An empty map means the wizard never ran. `type` falls back to
    /// pre-commit and `timeout` to ten seconds; every other key is required.
    pub fn from_entries(entries: &BTreeMap<String, String>, allow_insecure: bool) -> Result<Self> {
        if entries.is_empty() {
            return Err(WorklogError::ConfigurationMissing);
        }

        let required = |key: &str| -> Result<String> {
            entries
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    WorklogError::InvalidConfiguration(format!("`{CONFIG_SECTION}.{key}` is not set"))
                })
        };

        let email = required("email")?;
        let password = entries
            .get("password")
            .filter(|p| !p.is_empty())
            .cloned()
            .ok_or_else(|| {
                WorklogError::InvalidConfiguration(format!("`{CONFIG_SECTION}.password` is not set"))
            })?;

        let url = required("url")?;
        if !allow_insecure && !url.starts_with("https://") {
            return Err(WorklogError::InvalidConfiguration(format!(
                "`{CONFIG_SECTION}.url` must start with https:// (got {url})"
            )));
        }
        let url = url.trim_end_matches('/').to_string();

        let version_raw = required("version")?;
        let version = ApiVersion::parse(&version_raw).ok_or_else(|| {
            WorklogError::InvalidConfiguration(format!(
                "`{CONFIG_SECTION}.version` must be 2 or 3 (got {version_raw})"
            ))
        })?;

        let hook_type = match entries.get("type") {
            Some(raw) => HookType::parse(raw).ok_or_else(|| {
                WorklogError::InvalidConfiguration(format!(
                    "`{CONFIG_SECTION}.type` must be pre-commit, post-commit or pre-push (got {raw})"
                ))
            })?,
            None => HookType::PreCommit,
        };

        let timeout = match entries.get("timeout") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    WorklogError::InvalidConfiguration(format!(
                        "`{CONFIG_SECTION}.timeout` must be a positive number of seconds (got {raw})"
                    ))
                })?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            email,
            password,
            hook_type,
            url,
            version,
            timeout,
        })
    }

    /// The key/value pairs the wizard writes back to git config.
    pub fn to_entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("email", self.email.clone()),
            ("password", self.password.clone()),
            ("type", self.hook_type.as_str().to_string()),
            ("url", self.url.clone()),
            ("version", self.version.as_str().to_string()),
        ]
    }
}

/// Only debug builds honour the override; release binaries always require https.
#[cfg(debug_assertions)]
fn allow_insecure_url() -> bool {
    env::var(ALLOW_INSECURE_ENV)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[cfg(not(debug_assertions))]
fn allow_insecure_url() -> bool {
    false
}

/// Raw `worklog.*` entries, used by the wizard to pre-fill answers.
pub async fn read_entries() -> Result<BTreeMap<String, String>> {
    git::read_local_config_section(CONFIG_SECTION).await
}

pub async fn load_config() -> Result<WorklogConfig> {
    let entries = read_entries().await?;
    let config = WorklogConfig::from_entries(&entries, allow_insecure_url())?;
    log::debug!("loaded {config:?}");
    Ok(config)
}

pub async fn save_config(config: &WorklogConfig) -> Result<()> {
    for (key, value) in config.to_entries() {
        git::set_local_config(&format!("{CONFIG_SECTION}.{key}"), &value).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn complete() -> BTreeMap<String, String> {
        entries(&[
            ("email", "dev@example.com"),
            ("password", "secret"),
            ("type", "pre-push"),
            ("url", "https://jira.example.com/"),
            ("version", "3"),
        ])
    }

    #[test]
    fn parses_complete_config() {
        let config = WorklogConfig::from_entries(&complete(), false).unwrap();

        assert_eq!(config.email, "dev@example.com");
        assert_eq!(config.password, "secret");
        assert_eq!(config.hook_type, HookType::PrePush);
        assert_eq!(config.url, "https://jira.example.com");
        assert_eq!(config.version, ApiVersion::V3);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn empty_section_is_missing_configuration() {
        let err = WorklogConfig::from_entries(&BTreeMap::new(), false).unwrap_err();
        assert!(matches!(err, WorklogError::ConfigurationMissing));
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let mut map = complete();
        map.remove("password");
        let err = WorklogConfig::from_entries(&map, false).unwrap_err();
        assert!(err.to_string().contains("worklog.password"));
    }

    #[test]
    fn http_url_needs_explicit_opt_in() {
        let mut map = complete();
        map.insert("url".into(), "http://127.0.0.1:1234".into());

        assert!(matches!(
            WorklogConfig::from_entries(&map, false),
            Err(WorklogError::InvalidConfiguration(_))
        ));
        assert_eq!(
            WorklogConfig::from_entries(&map, true).unwrap().url,
            "http://127.0.0.1:1234"
        );
    }

    #[test]
    fn rejects_unknown_version_and_type() {
        let mut map = complete();
        map.insert("version".into(), "4".into());
        assert!(WorklogConfig::from_entries(&map, false).is_err());

        let mut map = complete();
        map.insert("type".into(), "pre-rebase".into());
        assert!(WorklogConfig::from_entries(&map, false).is_err());
    }

    #[test]
    fn type_and_timeout_have_defaults() {
        let mut map = complete();
        map.remove("type");
        map.insert("timeout".into(), "3".into());
        let config = WorklogConfig::from_entries(&map, false).unwrap();

        assert_eq!(config.hook_type, HookType::PreCommit);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn debug_output_hides_password() {
        let config = WorklogConfig::from_entries(&complete(), false).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("dev@example.com"));
    }

    #[test]
    fn entries_round_trip_through_wizard_keys() {
        let config = WorklogConfig::from_entries(&complete(), false).unwrap();
        let written: BTreeMap<String, String> = config
            .to_entries()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(WorklogConfig::from_entries(&written, false).unwrap(), config);
    }

    #[test]
    fn insecure_override_only_in_debug_builds() {
        env::set_var(ALLOW_INSECURE_ENV, "1");
        let allowed = allow_insecure_url();
        env::remove_var(ALLOW_INSECURE_ENV);

        assert_eq!(allowed, cfg!(debug_assertions));
    }

    #[test]
    fn only_post_commit_is_warning_only() {
        assert!(HookType::PreCommit.blocks_operation());
        assert!(HookType::PrePush.blocks_operation());
        assert!(!HookType::PostCommit.blocks_operation());
    }
}
