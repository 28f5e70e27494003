use crate::app_config::{AppConfig, Environment, ReportFormat, MAX_POSTS_PER_PLATFORM};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank credentials count as unset.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let env = parse_environment(&or_default("OSINT_ENV", "development"))?;
    let bind_addr = parse_addr("OSINT_BIND_ADDR", "127.0.0.1:8501")?;
    let log_level = or_default("OSINT_LOG_LEVEL", "info");

    let reddit_client_id = optional("REDDIT_CLIENT_ID");
    let reddit_client_secret = optional("REDDIT_CLIENT_SECRET");
    let reddit_user_agent = optional("REDDIT_USER_AGENT")
        .unwrap_or_else(|| "osint-analyzer/0.1 (keyword monitor)".to_string());
    let twitter_bearer_token = optional("TWITTER_BEARER_TOKEN");

    let max_posts_per_platform = parse_usize("MAX_POSTS_PER_PLATFORM", "100")?;
    if !(1..=MAX_POSTS_PER_PLATFORM).contains(&max_posts_per_platform) {
        return Err(invalid(
            "MAX_POSTS_PER_PLATFORM",
            format!("must be between 1 and {MAX_POSTS_PER_PLATFORM}"),
        ));
    }
    let request_timeout_secs = parse_u64("REQUEST_TIMEOUT", "30")?;
    let collector_timeout_secs = parse_u64("OSINT_COLLECTOR_TIMEOUT_SECS", "60")?;
    let max_retries = parse_u32("OSINT_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("OSINT_RETRY_BACKOFF_BASE_SECS", "2")?;
    let fetch_articles = parse_bool("OSINT_FETCH_ARTICLES", "false")?;

    let output_directory = PathBuf::from(or_default("OUTPUT_DIRECTORY", "./output/reports"));
    let report_formats = ReportFormat::parse_list(&or_default("REPORT_FORMAT", "json,html"))
        .map_err(|e| invalid("REPORT_FORMAT", e.to_string()))?;
    let sources_path = optional("OSINT_SOURCES_PATH").map(PathBuf::from);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        reddit_client_id,
        reddit_client_secret,
        reddit_user_agent,
        twitter_bearer_token,
        max_posts_per_platform,
        request_timeout_secs,
        collector_timeout_secs,
        max_retries,
        retry_backoff_base_secs,
        fetch_articles,
        output_directory,
        report_formats,
        sources_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "OSINT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
