//! The interactive assistant loop: stdin in, transcript out.
//!
//! Core effects are forwarded to the engine; engine events are mapped back
//! into core messages and applied, with new transcript entries rendered as
//! they appear. The loop is cooperative: while an analysis is pending the
//! event pump drains the engine until the core reports idle.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use guard_logging::{guard_info, guard_warn};
use truthguard_client::{
    ApiClient, ApiSettings, EngineEvent, EngineHandle, Phase, PollSettings, ReportOutcome,
};
use truthguard_core::{
    update, AnalysisPhase, AppState, AssistMode, BiasAnalysis, BiasOutcome, BiasSummary,
    ClaimVerdict, Effect, FactCheckNote, FactCheckVerdict, JobReport, Msg, NotificationStore,
    Severity, TimelineEvent, TimelineOutcome,
};

use crate::render;

pub fn run(base_url: String) -> anyhow::Result<()> {
    guard_info!("starting assistant against {}", base_url);
    let client = ApiClient::new(ApiSettings {
        base_url,
        ..ApiSettings::default()
    })?;
    let engine = EngineHandle::new(client, PollSettings::default());

    let mut state = AppState::new();
    let mut store = NotificationStore::seeded();

    println!("TruthGuard assistant. Type a topic to research, or :help for commands.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            ":quit" | ":q" => break,
            ":help" => help(),
            ":mode research" => dispatch(&mut state, &engine, Msg::ModeSelected(AssistMode::Research)),
            ":mode verify" => dispatch(&mut state, &engine, Msg::ModeSelected(AssistMode::Verify)),
            ":notifications" => render::notifications(&store),
            ":read-all" => {
                store.mark_all_read();
                println!("All notifications marked read.");
            }
            _ => {
                if let Some(rest) = line.strip_prefix(":read ") {
                    match rest.trim().parse() {
                        Ok(id) => store.mark_read(id),
                        Err(_) => println!("Usage: :read <id>"),
                    }
                } else if let Some(rest) = line.strip_prefix(":dismiss ") {
                    match rest.trim().parse() {
                        Ok(id) => store.remove(id),
                        Err(_) => println!("Usage: :dismiss <id>"),
                    }
                } else if line.starts_with(':') {
                    println!("Unknown command {line}; try :help.");
                } else {
                    submit_topic(&mut state, &engine, &mut store, line);
                }
            }
        }
    }

    Ok(())
}

fn help() {
    println!(
        "Commands:\n\
         \x20 :mode research | :mode verify   switch assistant mode\n\
         \x20 :notifications                  list notifications\n\
         \x20 :read <id> | :read-all          mark notifications read\n\
         \x20 :dismiss <id>                   remove a notification\n\
         \x20 :quit                           exit\n\
         Anything else is submitted as a topic."
    );
}

fn submit_topic(
    state: &mut AppState,
    engine: &EngineHandle,
    store: &mut NotificationStore,
    topic: &str,
) {
    let mode = state.mode();
    let already_rendered = state.view().transcript.len();
    dispatch(state, engine, Msg::InputChanged(topic.to_string()));
    dispatch(state, engine, Msg::TopicSubmitted);
    let completed = pump_until_idle(state, engine, already_rendered);

    if completed {
        let what = match mode {
            AssistMode::Research => "research",
            AssistMode::Verify => "verification",
        };
        store.add(
            "Analysis Complete",
            format!("Your {what} analysis has finished."),
            Severity::Success,
            None,
        );
    }
}

/// Applies a message and forwards the resulting effects to the engine.
fn dispatch(state: &mut AppState, engine: &EngineHandle, msg: Msg) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    for effect in effects {
        match effect {
            Effect::StartResearch { request_id, topic } => {
                engine.start_research(request_id, topic)
            }
            Effect::StartVerification { request_id, topic } => {
                engine.start_verification(request_id, topic)
            }
            Effect::CancelAnalysis { request_id } => {
                guard_info!("cancelling superseded request {}", request_id);
                engine.cancel_active();
            }
        }
    }
}

/// Drains engine events until the pending analysis concludes, rendering
/// status changes and freshly appended transcript entries. Returns false if
/// the analysis ended in failure.
fn pump_until_idle(state: &mut AppState, engine: &EngineHandle, already_rendered: usize) -> bool {
    let mut rendered = render_new_entries(state, already_rendered);
    let mut last_status = String::new();
    let mut completed = true;

    while state.view().busy {
        let Some(event) = engine.try_recv() else {
            std::thread::sleep(Duration::from_millis(20));
            continue;
        };
        if let EngineEvent::AnalysisFailed { request_id, error } = &event {
            guard_warn!("request {} failed: {}", request_id, error);
            let is_current = state.pending().is_some_and(|p| p.request_id == *request_id);
            if is_current {
                completed = false;
            }
        }
        dispatch(state, engine, msg_from_event(event));

        let view = state.view();
        if let Some(status) = &view.status_line {
            if *status != last_status {
                render::status_line(status);
                last_status.clone_from(status);
            }
        }
        rendered = render_new_entries(state, rendered);
    }

    completed
}

fn render_new_entries(state: &AppState, already_rendered: usize) -> usize {
    let view = state.view();
    for entry in &view.transcript[already_rendered..] {
        render::message(entry);
    }
    view.transcript.len()
}

fn msg_from_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress {
            request_id,
            phase,
            progress,
        } => Msg::AnalysisProgress {
            request_id,
            phase: map_phase(phase),
            progress,
        },
        EngineEvent::ReportReady {
            request_id,
            outcome,
            elapsed_secs,
        } => Msg::ReportReady {
            request_id,
            report: map_outcome(outcome),
            elapsed_secs,
        },
        EngineEvent::AnalysisFailed { request_id, error } => {
            Msg::AnalysisFailed { request_id, error }
        }
    }
}

fn map_phase(phase: Phase) -> AnalysisPhase {
    match phase {
        Phase::Timeline => AnalysisPhase::Timeline,
        Phase::Bias => AnalysisPhase::Bias,
    }
}

fn map_outcome(outcome: ReportOutcome) -> JobReport {
    match outcome {
        ReportOutcome::Timeline(results) => JobReport::Timeline(results.map(|r| TimelineOutcome {
            background: r.background,
            events: r
                .timeline
                .into_iter()
                .map(|e| TimelineEvent {
                    date: e.date,
                    event: e.event,
                    details: e.details,
                })
                .collect(),
            conclusion: r.conclusion,
        })),
        ReportOutcome::Bias(results) => JobReport::Bias(results.map(|r| BiasOutcome {
            summary: BiasSummary {
                total_articles_analyzed: r.summary.total_articles_analyzed,
                neutral_articles_found: r.summary.neutral_articles_found,
                biased_articles_found: r.summary.biased_articles_found,
                fact_checks_generated: r.summary.fact_checks_generated,
            },
            analyses: r
                .analyses
                .into_iter()
                .map(|a| BiasAnalysis {
                    source_url: a.source_url,
                    final_score: a.final_score,
                    judgment: a.judgment,
                })
                .collect(),
            fact_checks: r
                .fact_checks
                .into_iter()
                .map(|f| FactCheckNote {
                    misconception: f.misconception,
                    correction: f.correction,
                })
                .collect(),
        })),
        ReportOutcome::FactCheck(verdict) => {
            JobReport::FactCheck(verdict.map(|v| FactCheckVerdict {
                overall_verdict: v.overall_verdict,
                confidence_score: v.confidence_score,
                executive_summary: v.executive_summary,
                claims: v
                    .claim_by_claim_analysis
                    .into_iter()
                    .map(|c| ClaimVerdict {
                        claim: c.claim,
                        verdict: c.verdict,
                        confidence: c.confidence,
                        explanation: c.detailed_explanation,
                    })
                    .collect(),
                key_insights: v.key_insights.into_iter().map(|k| k.insight).collect(),
            }))
        }
    }
}
