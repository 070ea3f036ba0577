use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{JobEnvelope, StartJobResponse};
use crate::{ClientError, FactCheckResponse, JobKind, JobRecord, DEFAULT_BASE_URL};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
struct StartJobRequest<'a> {
    topic: &'a str,
}

#[derive(Serialize)]
struct FactCheckRequest<'a> {
    message: &'a str,
    run_id: &'a str,
}

/// Thin typed wrapper over the backend's HTTP surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Asks the backend to create a job for `topic` and returns its opaque id.
    ///
    /// An empty or whitespace-only topic is rejected before any network IO.
    /// A non-success status fails immediately; the caller surfaces the error.
    pub async fn start_job(&self, kind: JobKind, topic: &str) -> Result<String, ClientError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ClientError::EmptyTopic);
        }

        let path = kind.start_path();
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&StartJobRequest { topic })
            .send()
            .await?;
        let response = check_status(response, path)?;
        let parsed: StartJobResponse = decode(response, path).await?;
        Ok(parsed.job_id)
    }

    /// Fetches the current state of a job. One call per poll tick.
    pub async fn fetch_job<R: DeserializeOwned>(
        &self,
        kind: JobKind,
        job_id: &str,
    ) -> Result<JobRecord<R>, ClientError> {
        let path = kind.results_path();
        let response = self
            .http
            .get(format!("{}{}/{}", self.base_url, path, job_id))
            .send()
            .await?;
        let response = check_status(response, path)?;
        let envelope: JobEnvelope<R> = decode(response, path).await?;
        Ok(envelope.data)
    }

    /// Synchronous fact-check call; no job, no polling.
    pub async fn fact_check(
        &self,
        message: &str,
        run_id: &str,
    ) -> Result<FactCheckResponse, ClientError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ClientError::EmptyTopic);
        }

        let path = "/api/factcheck";
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&FactCheckRequest { message, run_id })
            .send()
            .await?;
        let response = check_status(response, path)?;
        decode(response, path).await
    }
}

fn check_status(response: reqwest::Response, context: &str) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::HttpStatus {
            status: status.as_u16(),
            context: context.to_string(),
        })
    }
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, ClientError> {
    response.json().await.map_err(|err| ClientError::Decode {
        context: context.to_string(),
        message: err.to_string(),
    })
}
