//! `platforms` and `doctor` commands.

use osint_core::{AppConfig, Platform, RedditMode, SourcesConfig};
use osint_report::ReportWriter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlatformStatus {
    pub platform: Platform,
    pub enabled: bool,
    pub detail: String,
}

/// Enabled/disabled state of every platform with a reason.
pub(crate) fn platform_statuses(config: &AppConfig, sources: &SourcesConfig) -> Vec<PlatformStatus> {
    let enabled = config.enabled_platforms();
    Platform::ALL
        .into_iter()
        .map(|platform| {
            let detail = match platform {
                Platform::Reddit => match config.reddit_mode() {
                    RedditMode::OAuth => format!(
                        "OAuth client credentials, r/{}",
                        sources.reddit.subreddit
                    ),
                    RedditMode::Anonymous => format!(
                        "anonymous public JSON, r/{} (set REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET for OAuth)",
                        sources.reddit.subreddit
                    ),
                },
                Platform::Twitter => {
                    if config.has_twitter_credentials() {
                        "API v2 recent search with bearer token".to_string()
                    } else {
                        "TWITTER_BEARER_TOKEN not set".to_string()
                    }
                }
                Platform::News => {
                    let names: Vec<&str> =
                        sources.news.feeds.iter().map(|f| f.name.as_str()).collect();
                    format!("{} RSS feeds: {}", names.len(), names.join(", "))
                }
            };
            PlatformStatus {
                platform,
                enabled: enabled.contains(&platform),
                detail,
            }
        })
        .collect()
}

/// Print platform availability.
///
/// # Errors
///
/// Returns an error if the configured sources file is invalid.
pub(crate) fn run_platforms(config: &AppConfig) -> anyhow::Result<()> {
    let sources = SourcesConfig::resolve(config.sources_path.as_deref())?;
    println!("{:<10}{:<10}DETAIL", "PLATFORM", "STATUS");
    for status in platform_statuses(config, &sources) {
        println!(
            "{:<10}{:<10}{}",
            status.platform.as_str(),
            if status.enabled { "enabled" } else { "disabled" },
            status.detail
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CheckLevel {
    Pass,
    Warn,
    Fail,
}

impl CheckLevel {
    fn marker(self) -> &'static str {
        match self {
            CheckLevel::Pass => "[ok]  ",
            CheckLevel::Warn => "[warn]",
            CheckLevel::Fail => "[FAIL]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Check {
    pub name: &'static str,
    pub level: CheckLevel,
    pub detail: String,
}

/// Setup checks. Only an unusable output directory is a failure; missing
/// credentials and a bad sources file are warnings.
pub(crate) fn doctor_checks(config: &AppConfig) -> Vec<Check> {
    let mut checks = Vec::new();

    checks.push(match config.reddit_mode() {
        RedditMode::OAuth => Check {
            name: "reddit credentials",
            level: CheckLevel::Pass,
            detail: "client id and secret configured".to_string(),
        },
        RedditMode::Anonymous => Check {
            name: "reddit credentials",
            level: CheckLevel::Warn,
            detail: "not configured, using anonymous public JSON (lower rate limits)".to_string(),
        },
    });

    checks.push(if config.has_twitter_credentials() {
        Check {
            name: "twitter credentials",
            level: CheckLevel::Pass,
            detail: "bearer token configured".to_string(),
        }
    } else {
        Check {
            name: "twitter credentials",
            level: CheckLevel::Warn,
            detail: "TWITTER_BEARER_TOKEN not set, twitter disabled".to_string(),
        }
    });

    checks.push(match SourcesConfig::resolve(config.sources_path.as_deref()) {
        Ok(sources) => Check {
            name: "sources",
            level: CheckLevel::Pass,
            detail: match &config.sources_path {
                Some(path) => format!(
                    "{} ({} news feeds)",
                    path.display(),
                    sources.news.feeds.len()
                ),
                None => format!("built-in defaults ({} news feeds)", sources.news.feeds.len()),
            },
        },
        Err(e) => Check {
            name: "sources",
            level: CheckLevel::Warn,
            detail: e.to_string(),
        },
    });

    let writer = ReportWriter::new(config.output_directory.clone());
    checks.push(match writer.check_writable() {
        Ok(()) => Check {
            name: "output directory",
            level: CheckLevel::Pass,
            detail: format!("{} is writable", writer.output_dir().display()),
        },
        Err(e) => Check {
            name: "output directory",
            level: CheckLevel::Fail,
            detail: e.to_string(),
        },
    });

    checks
}

/// Print the setup checklist.
///
/// # Errors
///
/// Returns an error when any check failed.
pub(crate) fn run_doctor(config: &AppConfig) -> anyhow::Result<()> {
    let checks = doctor_checks(config);
    for check in &checks {
        println!("{} {:<20}{}", check.level.marker(), check.name, check.detail);
    }
    let failed = checks.iter().filter(|c| c.level == CheckLevel::Fail).count();
    if failed > 0 {
        anyhow::bail!("{failed} check(s) failed");
    }
    println!();
    let enabled: Vec<&str> = config
        .enabled_platforms()
        .into_iter()
        .map(Platform::as_str)
        .collect();
    println!("platforms enabled: {}", enabled.join(", "));
    Ok(())
}
