use crate::{AssistMode, JobReport, RequestId};

/// Phase of a research analysis driven by the polling engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    /// Phase 1/2: historical timeline generation.
    Timeline,
    /// Phase 2/2: per-article bias analysis.
    Bias,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the topic input box.
    InputChanged(String),
    /// User switched between research and verification mode.
    ModeSelected(AssistMode),
    /// User submitted the current input as a topic.
    TopicSubmitted,
    /// Engine progress for the pending analysis.
    AnalysisProgress {
        request_id: RequestId,
        phase: AnalysisPhase,
        progress: String,
    },
    /// A report for the pending analysis is ready for the transcript.
    ReportReady {
        request_id: RequestId,
        report: JobReport,
        elapsed_secs: Option<f64>,
    },
    /// The pending analysis failed; `error` is shown to the user verbatim.
    AnalysisFailed {
        request_id: RequestId,
        error: String,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
