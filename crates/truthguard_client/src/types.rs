use serde::Deserialize;

/// Backend base URL used when nothing else is configured. The service is a
/// local collaborator; there is no authentication or versioning on the wire.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// A pollable backend job family. Each kind has its own start and results
/// endpoints and its own terminal payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Timeline,
    Bias,
}

impl JobKind {
    pub fn start_path(self) -> &'static str {
        match self {
            JobKind::Timeline => "/api/timeline/generate",
            JobKind::Bias => "/api/bias/analyze-topic",
        }
    }

    pub fn results_path(self) -> &'static str {
        match self {
            JobKind::Timeline => "/api/timeline/results",
            JobKind::Bias => "/api/bias/results",
        }
    }
}

/// Job lifecycle: `running` until the backend lands on one of the two
/// terminal states. There are no transitions out of `complete` or `failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Complete,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Failed)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StartJobResponse {
    pub job_id: String,
}

/// `{ "data": Job }` envelope around every results-endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JobEnvelope<R> {
    pub data: JobRecord<R>,
}

/// One observation of a backend job, typed by the job kind's results shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub struct JobRecord<R> {
    pub status: JobStatus,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub progress: Option<String>,
    #[serde(default)]
    pub results: Option<R>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimelineResults {
    pub background: String,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    pub conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimelineEntry {
    pub date: String,
    pub event: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BiasResults {
    pub summary: BiasSummary,
    #[serde(default)]
    pub analyses: Vec<SourceAnalysis>,
    #[serde(default)]
    pub fact_checks: Vec<FactCheckNote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct BiasSummary {
    pub total_articles_analyzed: u32,
    pub neutral_articles_found: u32,
    pub biased_articles_found: u32,
    #[serde(default)]
    pub fact_checks_generated: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceAnalysis {
    pub source_url: String,
    pub final_score: f64,
    pub judgment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FactCheckNote {
    pub misconception: String,
    pub correction: String,
}

/// Synchronous fact-check endpoint response; no job envelope, no polling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FactCheckResponse {
    pub success: bool,
    #[serde(default)]
    pub result: Option<FactCheckResult>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FactCheckResult {
    pub comprehensive_verdict: ComprehensiveVerdict,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComprehensiveVerdict {
    pub overall_verdict: String,
    pub confidence_score: f64,
    pub executive_summary: String,
    #[serde(default)]
    pub claim_by_claim_analysis: Vec<ClaimAnalysis>,
    #[serde(default)]
    pub key_insights: Vec<KeyInsight>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClaimAnalysis {
    pub claim: String,
    pub verdict: String,
    #[serde(default)]
    pub confidence: String,
    #[serde(default)]
    pub detailed_explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyInsight {
    pub insight: String,
}
