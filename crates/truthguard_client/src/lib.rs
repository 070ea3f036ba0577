//! TruthGuard client: HTTP job boundary and the analysis engine that drives
//! the long-running backend jobs from the assistant shell.
mod api;
mod engine;
mod error;
mod poll;
mod types;

pub use api::{ApiClient, ApiSettings};
pub use engine::{EngineEvent, EngineHandle, Phase, ReportOutcome};
pub use error::ClientError;
pub use poll::{poll_job, PollSettings};
pub use tokio_util::sync::CancellationToken;
pub use types::{
    BiasResults, BiasSummary, ClaimAnalysis, ComprehensiveVerdict, FactCheckNote,
    FactCheckResponse, FactCheckResult, JobKind, JobRecord, JobStatus, KeyInsight,
    SourceAnalysis, TimelineEntry, TimelineResults, DEFAULT_BASE_URL,
};
