use crate::report::format_report;
use crate::{AppState, AssistMode, ChatRole, Effect, JobReport, MessageEntry, Msg};

const RESEARCH_STATUS: &str = "Phase 1/2: Generating historical timeline...";
const BIAS_STATUS: &str = "Phase 2/2: Analyzing articles for bias...";
const VERIFY_STATUS: &str = "Cross-referencing claims with fact-checking databases...";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            // Mode switches are ignored mid-analysis; the pending flow keeps
            // the mode it started with.
            if state.pending().is_none() {
                state.set_mode(mode);
            }
            Vec::new()
        }
        Msg::TopicSubmitted => {
            let topic = state.input().trim().to_string();
            if topic.is_empty() {
                return (state, Vec::new());
            }

            let mut effects = Vec::with_capacity(2);
            if let Some(prev) = state.pending() {
                // Clear-before-replace: the superseded poll loop must be torn
                // down before a new one starts.
                effects.push(Effect::CancelAnalysis {
                    request_id: prev.request_id,
                });
            }

            let mode = state.mode();
            let status = match mode {
                AssistMode::Research => RESEARCH_STATUS,
                AssistMode::Verify => VERIFY_STATUS,
            };
            let request_id = state.begin_analysis(topic.clone(), status.to_string());
            effects.push(match mode {
                AssistMode::Research => Effect::StartResearch { request_id, topic },
                AssistMode::Verify => Effect::StartVerification { request_id, topic },
            });
            effects
        }
        Msg::AnalysisProgress {
            request_id,
            phase,
            progress,
        } => {
            state.apply_progress(request_id, phase, &progress);
            Vec::new()
        }
        Msg::ReportReady {
            request_id,
            report,
            elapsed_secs,
        } => {
            if state.is_current(request_id) {
                let entry = report_entry(&report, elapsed_secs);
                state.apply_report(entry, report.concludes_analysis(), BIAS_STATUS);
            }
            Vec::new()
        }
        Msg::AnalysisFailed { request_id, error } => {
            if state.is_current(request_id) {
                state.apply_failure(&error);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn report_entry(report: &JobReport, elapsed_secs: Option<f64>) -> MessageEntry {
    let formatted = format_report(report);
    MessageEntry {
        role: ChatRole::Bot,
        title: formatted.title.map(str::to_string),
        content: formatted.content,
        sources: formatted.sources,
        confidence: formatted.confidence,
        processing_secs: elapsed_secs,
        claims: formatted.claims,
    }
}
