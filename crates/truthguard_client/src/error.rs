/// Failure surface of the HTTP job boundary.
///
/// Every variant is terminal for the submission that hit it; there is no
/// retry or backoff anywhere in the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("topic must not be empty")]
    EmptyTopic,
    #[error("unexpected http status {status} from {context}")]
    HttpStatus { status: u16, context: String },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response from {context}: {message}")]
    Decode { context: String, message: String },
    /// Backend reported `status: "failed"`. Displays the backend's error
    /// string exactly as supplied.
    #[error("{0}")]
    JobFailed(String),
    #[error("analysis cancelled")]
    Cancelled,
}
