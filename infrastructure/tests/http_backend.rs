//! Integration tests for the HTTP backend against a mock server

use finder_application::{
    ChatError, ChatPresenter, ChatTransport, LoadRecordsUseCase, RecordSource,
    StreamChatUseCase, TransportError,
};
use finder_infrastructure::HttpBackend;
use futures::StreamExt;
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct CapturingPresenter {
    progress: Mutex<Vec<String>>,
    completed: Mutex<Vec<Vec<String>>>,
    errors: Mutex<Vec<String>>,
}

impl ChatPresenter for CapturingPresenter {
    fn on_progress(&self, text: &str) {
        self.progress.lock().unwrap().push(text.to_string());
    }

    fn on_completed(&self, log: &[String]) {
        self.completed.lock().unwrap().push(log.to_vec());
    }

    fn on_error(&self, error: &ChatError) {
        self.errors.lock().unwrap().push(error.kind().to_string());
    }
}

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&server.uri(), &server.uri()).unwrap()
}

#[tokio::test]
async fn test_open_chat_posts_prompt_as_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mcp_client/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "prompt": "I like cats" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Try Fiona."))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let mut stream = backend.open_chat("I like cats").await.unwrap();

    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk.unwrap());
    }
    assert_eq!(body, b"Try Fiona.");
}

#[tokio::test]
async fn test_open_chat_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mcp_client/chat"))
        .respond_with(ResponseTemplate::new(503).set_body_string("  overloaded \n"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let err = match backend.open_chat("hello").await {
        Ok(_) => panic!("expected a status error"),
        Err(err) => err,
    };

    match err {
        TransportError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_open_chat_connection_refused() {
    // Port 1 is reserved and never listening in the test environment
    let backend = HttpBackend::new("http://127.0.0.1:1", "http://127.0.0.1:1").unwrap();
    let err = match backend.open_chat("hello").await {
        Ok(_) => panic!("expected a connection error"),
        Err(err) => err,
    };
    assert!(matches!(err, TransportError::Connection(_)));
}

#[tokio::test]
async fn test_load_humans_parses_camel_case_records() {
    let mock_server = MockServer::start().await;

    let records = json!([
        {
            "id": 7,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "dateOfBirth": "1815-12-10",
            "hasAllergies": false,
            "bio": "Enjoys long walks\nand analytical engines"
        },
        {
            "firstName": "Alan",
            "lastName": "Turing",
            "dateOfBirth": "1912-06-23",
            "hasAllergies": true
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/mcp_api/load_humans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&records))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let humans = backend.load_humans().await.unwrap();

    assert_eq!(humans.len(), 2);
    assert_eq!(humans[0].id, 7);
    assert_eq!(humans[0].full_name(), "Ada Lovelace");
    assert_eq!(humans[1].id, 0);
    assert!(humans[1].has_allergies);
    assert!(humans[1].bio.is_empty());
}

#[tokio::test]
async fn test_load_humans_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mcp_api/load_humans"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let err = backend.load_humans().await.unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn test_load_records_use_case_swallows_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mcp_api/load_humans"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let use_case = LoadRecordsUseCase::new(Arc::new(backend_for(&mock_server)));
    assert!(use_case.execute().await.is_empty());
}

#[tokio::test]
async fn test_stream_chat_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mcp_client/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("Meet ```Biscuit```, a calm café cat."),
        )
        .mount(&mock_server)
        .await;

    let mut use_case = StreamChatUseCase::new(Arc::new(backend_for(&mock_server)));
    let presenter = CapturingPresenter::default();

    let text = use_case
        .send_and_stream("Which cat fits me?", &presenter)
        .await
        .unwrap();

    let expected = "Meet `Biscuit`, a calm café cat.";
    assert_eq!(text, expected);
    assert_eq!(use_case.log().entries(), &[expected.to_string()]);
    assert_eq!(
        presenter.progress.lock().unwrap().last().map(String::as_str),
        Some(expected)
    );
    assert_eq!(
        presenter.completed.lock().unwrap().as_slice(),
        &[vec![expected.to_string()]]
    );
    assert!(presenter.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_stream_chat_failure_leaves_log_untouched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mcp_client/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let mut use_case = StreamChatUseCase::new(Arc::new(backend_for(&mock_server)));
    let presenter = CapturingPresenter::default();

    let err = use_case
        .send_and_stream("hello", &presenter)
        .await
        .unwrap_err();

    assert!(matches!(err, ChatError::Transport(TransportError::Status { status: 500, .. })));
    assert!(use_case.log().is_empty());
    assert!(presenter.completed.lock().unwrap().is_empty());
    assert_eq!(presenter.errors.lock().unwrap().as_slice(), &["transport".to_string()]);
}
