//! End-to-end assessment flow tests
//!
//! Drives the session state machine through the real HTTP client against a
//! wiremock backend, covering the full answer-submit-score path.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use liora_client::api::LioraClient;
use liora_client::assessment::{AssessmentSession, Choice, Phase, Progress, TestKind};
use liora_client::config::{ApiConfig, RequestConfig};
use liora_client::error::SessionError;
use liora_client::identity::UserId;

const PHQ9: [&str; 9] = [
    "Little interest or pleasure in doing things?",
    "Feeling down or hopeless?",
    "Trouble sleeping?",
    "Feeling tired or low energy?",
    "Poor appetite or overeating?",
    "Feeling bad about yourself?",
    "Trouble concentrating?",
    "Restlessness or slowed movement?",
    "Thoughts of self-harm?",
];

fn create_test_client(base_url: &str) -> LioraClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
    };
    let request_config = RequestConfig {
        timeout_ms: 5000,
        max_retries: 0,
        retry_delay_ms: 100,
    };
    LioraClient::new(&config, UserId::generate(), request_config).expect("Failed to create client")
}

async fn mount_questions(server: &MockServer, test_type: &str, questions: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/get-questions"))
        .and(query_param("test_type", test_type))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "questions": questions })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_phq9_flow_submits_all_answers() {
    let mock_server = MockServer::start().await;
    mount_questions(&mock_server, "phq9", &PHQ9).await;

    Mock::given(method("POST"))
        .and(path("/submit-answers"))
        .and(body_json(json!({
            "test_type": "phq9",
            "answers": [1, 1, 1, 1, 1, 1, 1, 1, 1]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "score": 9,
            "category": "Mild"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let mut session = AssessmentSession::start(client, TestKind::Phq9).await.unwrap();
    assert_eq!(session.len(), 9);

    // Answer every question with "Several days" and advance nine times
    for i in 0..9 {
        session.record_answer(Choice::SeveralDays);
        let progress = session.advance().await.unwrap();
        if i < 8 {
            assert_eq!(progress, Progress::Moved(i + 1));
        } else {
            match progress {
                Progress::Completed(result) => {
                    assert_eq!(result.score, 9.0);
                    assert_eq!(result.category, "Mild");
                }
                other => panic!("expected completion, got {:?}", other),
            }
        }
    }

    assert!(matches!(session.phase(), Phase::Completed(_)));
}

#[tokio::test]
async fn test_submission_failure_then_retry_succeeds() {
    let mock_server = MockServer::start().await;
    mount_questions(&mock_server, "gad7", &["Feeling nervous or anxious?"]).await;

    // First submission attempt fails, the retry succeeds
    Mock::given(method("POST"))
        .and(path("/submit-answers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("scorer down"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/submit-answers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "score": 2,
            "category": "Minimal"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let mut session = AssessmentSession::start(client, TestKind::Gad7).await.unwrap();

    session.record_answer(Choice::MoreThanHalf);

    let err = session.advance().await.unwrap_err();
    assert!(matches!(err, SessionError::Submission(_)));
    assert_eq!(*session.phase(), Phase::InProgress);
    assert_eq!(session.current_answer(), Some(Choice::MoreThanHalf));

    // Retrying the same advance resubmits without re-answering
    match session.advance().await.unwrap() {
        Progress::Completed(result) => assert_eq!(result.category, "Minimal"),
        other => panic!("expected completion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_switching_test_kind_loads_fresh_question_set() {
    let mock_server = MockServer::start().await;
    mount_questions(&mock_server, "phq9", &PHQ9).await;
    mount_questions(
        &mock_server,
        "gad7",
        &["Feeling nervous or anxious?", "Trouble relaxing?"],
    )
    .await;

    let client = create_test_client(&mock_server.uri());
    let mut session = AssessmentSession::start(client, TestKind::Phq9).await.unwrap();

    session.record_answer(Choice::NearlyEveryDay);
    session.advance().await.unwrap();
    assert_eq!(session.cursor(), 1);

    session.select_test_kind("gad7").await.unwrap();
    assert_eq!(session.kind(), TestKind::Gad7);
    assert_eq!(session.len(), 2);
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.current_answer(), None);
}

#[tokio::test]
async fn test_unrecognized_test_kind_does_not_touch_backend() {
    let mock_server = MockServer::start().await;
    mount_questions(&mock_server, "phq9", &PHQ9).await;

    let client = create_test_client(&mock_server.uri());
    let mut session = AssessmentSession::start(client, TestKind::Phq9).await.unwrap();

    session.select_test_kind("unknown").await.unwrap();
    assert_eq!(session.kind(), TestKind::Phq9);
    assert_eq!(*session.phase(), Phase::InProgress);

    // Only the initial phq9 fetch reached the server
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}
