use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use serde_json::json;
use truthguard_client::{
    ApiClient, ApiSettings, EngineEvent, EngineHandle, Phase, PollSettings, ReportOutcome,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine_for(server: &MockServer) -> EngineHandle {
    let client = ApiClient::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("client builds");
    EngineHandle::new(
        client,
        PollSettings {
            interval: Duration::from_millis(25),
        },
    )
}

/// Drains engine events until `count` have arrived or the deadline passes.
fn collect_events(engine: &EngineHandle, count: usize, deadline: Duration) -> Vec<EngineEvent> {
    let started = Instant::now();
    let mut events = Vec::new();
    while events.len() < count && started.elapsed() < deadline {
        match engine.try_recv() {
            Some(event) => events.push(event),
            None => std::thread::sleep(Duration::from_millis(5)),
        }
    }
    events
}

#[tokio::test(flavor = "multi_thread")]
async fn research_flow_emits_phase_events_and_stops_polling() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/timeline/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "job_id": "t-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/results/t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "status": "running", "topic": "solar", "progress": "50%" }
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/results/t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "status": "complete",
                "topic": "solar",
                "results": {
                    "background": "Solar power history.",
                    "timeline": [],
                    "conclusion": "Still growing."
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/bias/analyze-topic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "job_id": "b-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bias/results/b-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "status": "complete",
                "topic": "solar",
                "results": {
                    "summary": {
                        "total_articles_analyzed": 2,
                        "neutral_articles_found": 2,
                        "biased_articles_found": 0,
                        "fact_checks_generated": 0
                    },
                    "analyses": [],
                    "fact_checks": []
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.start_research(7, "solar");

    let events = collect_events(&engine, 3, Duration::from_secs(5));
    assert_eq!(events.len(), 3);

    assert_eq!(
        events[0],
        EngineEvent::Progress {
            request_id: 7,
            phase: Phase::Timeline,
            progress: "50%".to_string(),
        }
    );
    match &events[1] {
        EngineEvent::ReportReady {
            request_id: 7,
            outcome: ReportOutcome::Timeline(Some(results)),
            elapsed_secs: None,
        } => assert_eq!(results.background, "Solar power history."),
        other => panic!("unexpected second event: {other:?}"),
    }
    match &events[2] {
        EngineEvent::ReportReady {
            request_id: 7,
            outcome: ReportOutcome::Bias(Some(results)),
            elapsed_secs: Some(elapsed),
        } => {
            assert_eq!(results.summary.total_articles_analyzed, 2);
            assert!(*elapsed > 0.0);
        }
        other => panic!("unexpected third event: {other:?}"),
    }

    // The flow is done: no stray events, and the exact mock budgets above are
    // verified for over-polling when the server drops.
    std::thread::sleep(Duration::from_millis(150));
    assert!(engine.try_recv().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_job_surfaces_the_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/timeline/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "job_id": "t-2" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/results/t-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "status": "failed", "topic": "solar", "error": "no sources found" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.start_research(3, "solar");

    let events = collect_events(&engine, 1, Duration::from_secs(5));
    assert_eq!(
        events,
        vec![EngineEvent::AnalysisFailed {
            request_id: 3,
            error: "no sources found".to_string(),
        }]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn verification_flow_reports_the_verdict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/factcheck"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {
                "comprehensive_verdict": {
                    "overall_verdict": "MIXED",
                    "confidence_score": 0.6,
                    "executive_summary": "Partly supported.",
                    "claim_by_claim_analysis": [],
                    "key_insights": []
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.start_verification(11, "a bold claim");

    let events = collect_events(&engine, 1, Duration::from_secs(5));
    match &events[..] {
        [EngineEvent::ReportReady {
            request_id: 11,
            outcome: ReportOutcome::FactCheck(Some(verdict)),
            elapsed_secs: Some(_),
        }] => assert_eq!(verdict.overall_verdict, "MIXED"),
        other => panic!("unexpected events: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn unsuccessful_fact_check_yields_an_empty_verdict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/factcheck"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": false })),
        )
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.start_verification(12, "a bold claim");

    let events = collect_events(&engine, 1, Duration::from_secs(5));
    match &events[..] {
        [EngineEvent::ReportReady {
            request_id: 12,
            outcome: ReportOutcome::FactCheck(None),
            ..
        }] => {}
        other => panic!("unexpected events: {other:?}"),
    }
}
