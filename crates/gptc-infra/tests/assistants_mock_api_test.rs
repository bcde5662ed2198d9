//! Request-level tests for `OpenAiAssistantsClient` against a mock server.
//!
//! Each test mounts the one endpoint it expects, so a wrong path, method or
//! body falls through to wiremock's default 404.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gptc_core::client::AssistantsClient;
use gptc_infra::openai::{OpenAiAssistantsClient, OpenAiConfig};
use gptc_types::assistant::AssistantSettings;
use gptc_types::error::ServiceError;
use gptc_types::message::{MessageContent, MessageRole};
use gptc_types::run::RunStatus;

fn client_for(server: &MockServer) -> OpenAiAssistantsClient {
    let config = OpenAiConfig::new(SecretString::from("test-api-key".to_string()))
        .with_base_url(server.uri());
    OpenAiAssistantsClient::new(config).unwrap()
}

fn run_json(status: &str) -> serde_json::Value {
    json!({
        "id": "run_1",
        "object": "thread.run",
        "thread_id": "thread_1",
        "assistant_id": "asst_1",
        "status": status,
        "last_error": null
    })
}

fn error_json(message: &str) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "type": "invalid_request_error",
            "param": null,
            "code": null
        }
    })
}

#[tokio::test]
async fn test_create_assistant_sends_settings_with_beta_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/assistants"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(header("OpenAI-Beta", "assistants=v2"))
        .and(body_json(json!({
            "name": "Code Lingo Assistant",
            "instructions": "You are a helpful assistant.",
            "model": "gpt-3.5-turbo-1106"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "asst_1",
            "object": "assistant",
            "name": "Code Lingo Assistant",
            "model": "gpt-3.5-turbo-1106",
            "instructions": "You are a helpful assistant.",
            "tools": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = AssistantSettings {
        name: "Code Lingo Assistant".to_string(),
        instructions: "You are a helpful assistant.".to_string(),
        model: "gpt-3.5-turbo-1106".to_string(),
    };
    let assistant = client_for(&server).create_assistant(&settings).await.unwrap();
    assert_eq!(assistant.id, "asst_1");
    assert_eq!(assistant.model, "gpt-3.5-turbo-1106");
}

#[tokio::test]
async fn test_create_message_posts_user_role() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/messages"))
        .and(body_json(json!({"role": "user", "content": "hello\nworld"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_user",
            "object": "thread.message",
            "thread_id": "thread_1",
            "role": "user",
            "content": [{"type": "text", "text": {"value": "hello\nworld", "annotations": []}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let message = client_for(&server)
        .create_message("thread_1", "hello\nworld")
        .await
        .unwrap();
    assert_eq!(message.id, "msg_user");
    assert_eq!(message.role, MessageRole::User);
}

#[tokio::test]
async fn test_create_run_posts_assistant_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/runs"))
        .and(body_json(json!({"assistant_id": "asst_1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_json("queued")))
        .expect(1)
        .mount(&server)
        .await;

    let run = client_for(&server).create_run("thread_1", "asst_1").await.unwrap();
    assert_eq!(run.status, RunStatus::Queued);
}

#[tokio::test]
async fn test_cancel_run_posts_to_cancel_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/runs/run_1/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_json("cancelling")))
        .expect(1)
        .mount(&server)
        .await;

    let run = client_for(&server).cancel_run("thread_1", "run_1").await.unwrap();
    assert_eq!(run.id, "run_1");
    assert_eq!(run.status, RunStatus::Cancelling);
}

#[tokio::test]
async fn test_list_messages_asks_for_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/messages"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                {
                    "id": "msg_2",
                    "thread_id": "thread_1",
                    "role": "assistant",
                    "content": [{"type": "image_file", "image_file": {"file_id": "file-img"}}]
                },
                {
                    "id": "msg_1",
                    "thread_id": "thread_1",
                    "role": "user",
                    "content": [{"type": "text", "text": {"value": "draw", "annotations": []}}]
                }
            ],
            "first_id": "msg_2",
            "last_id": "msg_1",
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = client_for(&server).list_messages("thread_1").await.unwrap();
    assert_eq!(list.data.len(), 2);
    assert_eq!(list.data[0].id, "msg_2");
    assert!(matches!(
        &list.data[0].content[0],
        MessageContent::ImageFile { image_file } if image_file.file_id == "file-img"
    ));
}

#[tokio::test]
async fn test_retrieve_run_and_file_use_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/runs/run_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_json("in_progress")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/file-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-a",
            "object": "file",
            "bytes": 120,
            "filename": "doc.txt",
            "purpose": "assistants"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let run = client.retrieve_run("thread_1", "run_1").await.unwrap();
    assert!(run.status.is_pending());
    let file = client.retrieve_file("file-a").await.unwrap();
    assert_eq!(file.filename, "doc.txt");
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(error_json("Incorrect API key provided")),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).create_thread().await.unwrap_err();
    assert!(
        matches!(err, ServiceError::AuthenticationFailed(ref m) if m == "Incorrect API key provided"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_server_error_keeps_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/messages/msg_1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(error_json("The server had an error")))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .retrieve_message("thread_1", "msg_1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Api { status: 500, ref message } if message == "The server had an error"
    ));
}

#[tokio::test]
async fn test_malformed_body_is_a_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).create_thread().await.unwrap_err();
    assert!(matches!(err, ServiceError::Deserialization(_)));
}
