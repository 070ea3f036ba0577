use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use guard_logging::{guard_debug, guard_info, guard_warn};
use tokio_util::sync::CancellationToken;

use crate::poll::poll_job;
use crate::{
    ApiClient, BiasResults, ClientError, ComprehensiveVerdict, JobKind, PollSettings,
    TimelineResults,
};

pub type RequestId = u64;

enum EngineCommand {
    StartResearch { request_id: RequestId, topic: String },
    StartVerification { request_id: RequestId, topic: String },
    CancelActive,
}

/// Phase of the two-step research flow, from the engine's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Timeline,
    Bias,
}

/// Terminal payload of one analysis step, typed per job kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Timeline(Option<TimelineResults>),
    Bias(Option<BiasResults>),
    FactCheck(Option<ComprehensiveVerdict>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Progress {
        request_id: RequestId,
        phase: Phase,
        progress: String,
    },
    ReportReady {
        request_id: RequestId,
        outcome: ReportOutcome,
        /// Seconds since the submission started; set on the concluding report.
        elapsed_secs: Option<f64>,
    },
    AnalysisFailed {
        request_id: RequestId,
        error: String,
    },
}

/// Tracks the single cancellation token of the active poll flow.
///
/// "Clear-before-replace" is the only concurrency discipline the slice
/// needs: the prior token is always cancelled before a new one exists.
#[derive(Default)]
struct ActivePoll {
    token: Option<CancellationToken>,
}

impl ActivePoll {
    /// Cancels any prior flow and hands out the token for the next one.
    fn replace(&mut self) -> CancellationToken {
        self.cancel();
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        token
    }

    fn cancel(&mut self) {
        if let Some(prev) = self.token.take() {
            prev.cancel();
        }
    }
}

/// Handle to the engine worker owning the tokio runtime.
///
/// Commands go in over a channel; events come back out and are drained
/// cooperatively with [`EngineHandle::try_recv`]. Dropping the handle tears
/// down the worker together with any in-flight poll loop.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(client: ApiClient, poll: PollSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let client = Arc::new(client);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut active = ActivePoll::default();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartResearch { request_id, topic } => {
                        let cancel = active.replace();
                        guard_info!("StartResearch request_id={} topic={}", request_id, topic);
                        runtime.spawn(run_research(
                            client.clone(),
                            poll.clone(),
                            cancel,
                            request_id,
                            topic,
                            event_tx.clone(),
                        ));
                    }
                    EngineCommand::StartVerification { request_id, topic } => {
                        let cancel = active.replace();
                        guard_info!("StartVerification request_id={}", request_id);
                        runtime.spawn(run_verification(
                            client.clone(),
                            cancel,
                            request_id,
                            topic,
                            event_tx.clone(),
                        ));
                    }
                    EngineCommand::CancelActive => active.cancel(),
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn start_research(&self, request_id: RequestId, topic: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::StartResearch {
            request_id,
            topic: topic.into(),
        });
    }

    pub fn start_verification(&self, request_id: RequestId, topic: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::StartVerification {
            request_id,
            topic: topic.into(),
        });
    }

    pub fn cancel_active(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelActive);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn run_research(
    client: Arc<ApiClient>,
    poll: PollSettings,
    cancel: CancellationToken,
    request_id: RequestId,
    topic: String,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let started = Instant::now();
    let result = research_flow(
        &client, &poll, &cancel, request_id, &topic, started, &event_tx,
    )
    .await;
    report_flow_end(request_id, result, &cancel, &event_tx);
}

async fn research_flow(
    client: &ApiClient,
    poll: &PollSettings,
    cancel: &CancellationToken,
    request_id: RequestId,
    topic: &str,
    started: Instant,
    event_tx: &mpsc::Sender<EngineEvent>,
) -> Result<(), ClientError> {
    // Phase 1/2: historical timeline.
    let job_id = client.start_job(JobKind::Timeline, topic).await?;
    if cancel.is_cancelled() {
        return Err(ClientError::Cancelled);
    }
    let record = poll_job::<TimelineResults>(client, JobKind::Timeline, &job_id, poll, cancel, {
        let event_tx = event_tx.clone();
        move |progress| {
            let _ = event_tx.send(EngineEvent::Progress {
                request_id,
                phase: Phase::Timeline,
                progress,
            });
        }
    })
    .await?;
    let _ = event_tx.send(EngineEvent::ReportReady {
        request_id,
        outcome: ReportOutcome::Timeline(record.results),
        elapsed_secs: None,
    });

    // Phase 2/2: per-article bias analysis.
    let job_id = client.start_job(JobKind::Bias, topic).await?;
    if cancel.is_cancelled() {
        return Err(ClientError::Cancelled);
    }
    let record = poll_job::<BiasResults>(client, JobKind::Bias, &job_id, poll, cancel, {
        let event_tx = event_tx.clone();
        move |progress| {
            let _ = event_tx.send(EngineEvent::Progress {
                request_id,
                phase: Phase::Bias,
                progress,
            });
        }
    })
    .await?;
    let _ = event_tx.send(EngineEvent::ReportReady {
        request_id,
        outcome: ReportOutcome::Bias(record.results),
        elapsed_secs: Some(started.elapsed().as_secs_f64()),
    });
    Ok(())
}

async fn run_verification(
    client: Arc<ApiClient>,
    cancel: CancellationToken,
    request_id: RequestId,
    topic: String,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let started = Instant::now();
    let run_id = format!("factcheck-{request_id}");
    let result = client.fact_check(&topic, &run_id).await.map(|response| {
        let verdict = if response.success {
            response.result.map(|r| r.comprehensive_verdict)
        } else {
            None
        };
        let _ = event_tx.send(EngineEvent::ReportReady {
            request_id,
            outcome: ReportOutcome::FactCheck(verdict),
            elapsed_secs: Some(started.elapsed().as_secs_f64()),
        });
    });
    report_flow_end(request_id, result, &cancel, &event_tx);
}

/// A superseded flow stays silent; the replacing submission owns the
/// transcript from the moment it cancelled this one.
fn report_flow_end(
    request_id: RequestId,
    result: Result<(), ClientError>,
    cancel: &CancellationToken,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match result {
        Ok(()) => {}
        Err(ClientError::Cancelled) => {
            guard_debug!("request {} superseded", request_id);
        }
        Err(err) if cancel.is_cancelled() => {
            guard_debug!("request {} superseded after error: {}", request_id, err);
        }
        Err(err) => {
            guard_warn!("request {} failed: {}", request_id, err);
            let _ = event_tx.send(EngineEvent::AnalysisFailed {
                request_id,
                error: err.to_string(),
            });
        }
    }
}
