use anyhow::{Result, bail};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::time::Instant;
use tokio::time::{Duration, sleep};
use tracing::{error, info};

use super::interface::AzureInterface;
use super::models::ArmError;

const MAX_WAIT: Duration = Duration::from_secs(1800);
const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Status document behind an `Azure-AsyncOperation` header.
#[derive(Debug, Deserialize)]
pub(crate) struct OperationStatus {
    pub status: String,
    pub error: Option<ArmError>,
}

impl OperationStatus {
    fn is_terminal(&self) -> bool {
        matches!(self.status.as_str(), "Succeeded" | "Failed" | "Canceled")
    }
}

impl AzureInterface {
    /// Blocks until an accepted mutation reaches a terminal state. Accepted
    /// responses carry either an `Azure-AsyncOperation` header (polled for a
    /// status document) or a `Location` header (polled until the status code
    /// stops being 202); a response with neither completed synchronously.
    pub(crate) async fn await_operation(&self, response: Response, what: &str) -> Result<()> {
        let status_url = header_string(&response, "Azure-AsyncOperation");
        let location_url = header_string(&response, "Location");

        let start = Instant::now();

        if let Some(url) = status_url {
            loop {
                if start.elapsed() >= MAX_WAIT {
                    error!(
                        "Timed out after {} seconds waiting for: {}",
                        MAX_WAIT.as_secs(),
                        what
                    );
                    bail!("Timed out waiting for {} to complete", what);
                }

                let status: OperationStatus = self.poll_json(&url).await?;
                if !status.is_terminal() {
                    sleep(POLL_INTERVAL).await;
                    continue;
                }

                if status.status == "Succeeded" {
                    info!("Operation completed: {}", what);
                    return Ok(());
                }

                let detail = status
                    .error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "no error detail".to_string());
                error!("Operation '{}' ended as {}: {}", what, status.status, detail);
                bail!("{} {}: {}", what, status.status.to_lowercase(), detail);
            }
        }

        let url = match location_url {
            Some(url) => url,
            // Synchronous completion; the success status was checked upstream.
            None => return Ok(()),
        };

        loop {
            if start.elapsed() >= MAX_WAIT {
                error!(
                    "Timed out after {} seconds waiting for: {}",
                    MAX_WAIT.as_secs(),
                    what
                );
                bail!("Timed out waiting for {} to complete", what);
            }

            match self.poll_status(&url).await? {
                StatusCode::ACCEPTED => sleep(POLL_INTERVAL).await,
                // Deletions finish by making the polled resource disappear.
                StatusCode::NOT_FOUND => {
                    info!("Operation completed: {}", what);
                    return Ok(());
                }
                status if status.is_success() => {
                    info!("Operation completed: {}", what);
                    return Ok(());
                }
                status => {
                    error!("Polling '{}' returned unexpected status {}", what, status);
                    bail!("{} polling returned unexpected status {}", what, status);
                }
            }
        }
    }
}

fn header_string(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::OperationStatus;

    #[test]
    fn parses_a_succeeded_status() {
        let status: OperationStatus =
            serde_json::from_str(r#"{"status": "Succeeded"}"#).unwrap();
        assert_eq!(status.status, "Succeeded");
        assert!(status.is_terminal());
        assert!(status.error.is_none());
    }

    #[test]
    fn parses_an_in_flight_status() {
        let status: OperationStatus =
            serde_json::from_str(r#"{"status": "InProgress"}"#).unwrap();
        assert_eq!(status.status, "InProgress");
        assert!(!status.is_terminal());
        assert!(status.error.is_none());
    }

    #[test]
    fn parses_a_failed_status_with_detail() {
        let status: OperationStatus = serde_json::from_str(
            r#"{"status": "Failed", "error": {"code": "AllocationFailed", "message": "No capacity."}}"#,
        )
        .unwrap();
        assert!(status.is_terminal());
        assert_eq!(
            status.error.unwrap().to_string(),
            "AllocationFailed: No capacity."
        );
    }
}
