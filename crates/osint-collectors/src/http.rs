//! Shared HTTP plumbing: client construction and status classification.

use std::time::Duration;

use osint_core::Platform;
use reqwest::{Client, Response, StatusCode};

use crate::error::CollectError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

pub(crate) fn build_client(
    platform: Platform,
    timeout_secs: u64,
    user_agent: &str,
) -> Result<Client, CollectError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()
        .map_err(|e| CollectError::network(platform, e))
}

/// Map a non-2xx response onto the collector error taxonomy.
pub(crate) fn check_status(platform: Platform, response: Response) -> Result<Response, CollectError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            Err(CollectError::RateLimited {
                platform,
                retry_after_secs,
            })
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CollectError::Authentication {
            platform,
            message: format!("request rejected with status {}", status.as_u16()),
        }),
        _ => Err(CollectError::UnexpectedStatus {
            platform,
            status: status.as_u16(),
        }),
    }
}
