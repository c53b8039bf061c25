//! Hosted inference client against a local mock endpoint

use std::sync::Arc;
use std::time::Duration;
use truthverse_domain::Stance;
use truthverse_nli::{HfInferenceModel, NliError, StanceClassifier, StanceConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "facebook/bart-large-mnli";
const MODEL_PATH: &str = "/models/facebook/bart-large-mnli";

fn model(server: &MockServer) -> HfInferenceModel {
    HfInferenceModel::new(
        server.uri(),
        MODEL,
        Some("hf_test".to_string()),
        Duration::from_secs(5),
    )
    .unwrap()
    .with_max_retries(3)
    .with_retry_base_delay(Duration::from_millis(1))
}

fn labels(top: &str, score: f64) -> String {
    format!(
        r#"[[{{"label":"{}","score":{}}},{{"label":"neutral","score":0.05}}]]"#,
        top, score
    )
}

#[tokio::test]
async fn test_success_response_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("authorization", "Bearer hf_test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(labels("ENTAILMENT", 0.91)))
        .expect(1)
        .mount(&server)
        .await;

    let raw = model(&server).infer("Masks work", "Masks reduce spread").await.unwrap();
    assert_eq!(raw.label, "ENTAILMENT");
    assert!((raw.confidence - 0.91).abs() < 1e-12);

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(body.contains("Masks work [SEP] Masks reduce spread"));
}

#[tokio::test]
async fn test_missing_model_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = model(&server).infer("claim", "evidence").await;
    assert!(matches!(result, Err(NliError::ModelNotAvailable(m)) if m == MODEL));
}

#[tokio::test]
async fn test_rate_limit_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let result = model(&server).infer("claim", "evidence").await;
    assert!(matches!(result, Err(NliError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_server_error_retried_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("loading"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(labels("contradiction", 0.8)))
        .mount(&server)
        .await;

    let raw = model(&server).infer("claim", "evidence").await.unwrap();
    assert_eq!(raw.label, "contradiction");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_server_errors_exhaust_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&server)
        .await;

    let result = model(&server).infer("claim", "evidence").await;
    assert!(matches!(result, Err(NliError::Communication(msg)) if msg.contains("500")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_classifier_over_hosted_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(labels("contradiction", 0.75)))
        .mount(&server)
        .await;

    let classifier = StanceClassifier::inference(Arc::new(model(&server)), &StanceConfig::default());
    let judgment = classifier.classify("Masks work", "Masks do nothing").await;

    assert_eq!(judgment.stance, Stance::Contradict);
    assert_eq!(judgment.confidence, 0.75);
}
