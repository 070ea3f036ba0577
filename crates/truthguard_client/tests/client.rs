use pretty_assertions::assert_eq;
use serde_json::json;
use truthguard_client::{ApiClient, ApiSettings, ClientError, JobKind};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("client builds")
}

#[tokio::test]
async fn empty_topic_is_rejected_without_io() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = client.start_job(JobKind::Timeline, "   \t ").await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyTopic));

    let err = client.fact_check("", "factcheck-1").await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyTopic));
}

#[tokio::test]
async fn start_job_posts_trimmed_topic_and_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/timeline/generate"))
        .and(body_json(json!({ "topic": "climate change" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "job_id": "job-42" })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let job_id = client
        .start_job(JobKind::Timeline, "  climate change  ")
        .await
        .expect("job starts");
    assert_eq!(job_id, "job-42");
}

#[tokio::test]
async fn start_job_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bias/analyze-topic"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = client.start_job(JobKind::Bias, "topic").await.unwrap_err();
    assert!(matches!(err, ClientError::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn start_job_fails_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/timeline/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = client.start_job(JobKind::Timeline, "topic").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn fetch_job_unwraps_the_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/timeline/results/job-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "status": "running",
                "topic": "climate change",
                "progress": "Searching news archives..."
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let record = client
        .fetch_job::<truthguard_client::TimelineResults>(JobKind::Timeline, "job-7")
        .await
        .expect("fetch ok");
    assert_eq!(record.topic, "climate change");
    assert_eq!(record.progress.as_deref(), Some("Searching news archives..."));
    assert!(!record.status.is_terminal());
    assert_eq!(record.results, None);
}

#[tokio::test]
async fn fact_check_posts_message_and_run_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/factcheck"))
        .and(body_json(json!({
            "message": "the earth is flat",
            "run_id": "factcheck-3"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {
                "comprehensive_verdict": {
                    "overall_verdict": "FALSE",
                    "confidence_score": 0.99,
                    "executive_summary": "Contradicted by all evidence.",
                    "claim_by_claim_analysis": [],
                    "key_insights": [{ "insight": "Satellite imagery settles it." }]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let response = client
        .fact_check("the earth is flat", "factcheck-3")
        .await
        .expect("fact check ok");
    assert!(response.success);
    let verdict = response.result.expect("verdict present").comprehensive_verdict;
    assert_eq!(verdict.overall_verdict, "FALSE");
    assert_eq!(verdict.key_insights[0].insight, "Satellite imagery settles it.");
}
