use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::{ApiClient, ClientError, JobKind, JobRecord, JobStatus};

const DEFAULT_PROGRESS: &str = "Processing...";
const GENERIC_JOB_FAILURE: &str = "The analysis job failed.";

#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Wall-clock period between status checks.
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
        }
    }
}

/// Polls a job on a fixed period until it reaches a terminal state.
///
/// The first check happens one full period after the call; ticks are strictly
/// sequential because the next sleep only starts once the previous fetch has
/// been handled. Intermediate `running` observations invoke `on_progress`
/// with the backend's progress string, or a fixed placeholder when absent.
///
/// Terminal outcomes:
/// - `complete` resolves with the full record (results may still be absent;
///   the formatter downstream tolerates that),
/// - `failed` fails with the backend's error string or a generic fallback,
/// - any transport, status or decode failure on a tick fails immediately.
///
/// Cancelling `cancel` stops the loop at the next tick boundary with
/// [`ClientError::Cancelled`]. No fetches are issued after a terminal state
/// or cancellation.
pub async fn poll_job<R: DeserializeOwned>(
    client: &ApiClient,
    kind: JobKind,
    job_id: &str,
    settings: &PollSettings,
    cancel: &CancellationToken,
    mut on_progress: impl FnMut(String),
) -> Result<JobRecord<R>, ClientError> {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            _ = tokio::time::sleep(settings.interval) => {}
        }

        let record = client.fetch_job::<R>(kind, job_id).await?;
        match record.status {
            JobStatus::Running => {
                let progress = record
                    .progress
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PROGRESS.to_string());
                on_progress(progress);
            }
            JobStatus::Complete => return Ok(record),
            JobStatus::Failed => {
                let error = record
                    .error
                    .unwrap_or_else(|| GENERIC_JOB_FAILURE.to_string());
                return Err(ClientError::JobFailed(error));
            }
        }
    }
}
