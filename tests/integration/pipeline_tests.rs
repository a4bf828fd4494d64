//! Full runs against the fake service

use crate::common::{ClientFactory, DirectoryServer};
use directory_mailer::runner::{CLIENTS_FILE, DETAILS_FILE, Pipeline, PipelineSettings, RunError};
use directory_mailer::core::batch::AsyncBatchConfig;
use directory_mailer::sdk::{ClientDetail, ClientSummary, DirectoryClient};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(output_dir: &Path, message: Option<&str>) -> PipelineSettings {
    let batch = AsyncBatchConfig::new()
        .with_workers(4)
        .with_pacing(Duration::from_millis(1));
    PipelineSettings {
        output_dir: output_dir.to_path_buf(),
        detail_batch: batch.clone(),
        send_batch: batch,
        message: message.map(str::to_string),
        start_index: 0,
        test_recipient: None,
        preview: 3,
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_run_writes_dumps() {
    let server = DirectoryServer::start(&ClientFactory::mixed_listing(5), &[2]).await;
    let config = server.config();
    let client = DirectoryClient::new(config.clone()).unwrap();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("users_json");

    let report = Pipeline::new(Arc::new(client), config.credentials(), settings(&output, None))
        .run()
        .await
        .unwrap();

    assert_eq!(report.listed, 7);
    assert_eq!(report.retained, 5);
    assert_eq!(report.dropped, 2);
    assert_eq!(report.details.succeeded, 4);
    assert_eq!(report.details.failed, 1);
    assert!(report.broadcast.is_none());
    assert!(server.sent_messages().await.is_empty());

    let clients: Vec<ClientSummary> = read_json(&output.join(CLIENTS_FILE));
    assert_eq!(clients.len(), 5);
    assert!(clients.iter().all(|c| c.is_reachable()));

    let raw = std::fs::read_to_string(output.join(CLIENTS_FILE)).unwrap();
    assert!(raw.contains("\n    {"));
    assert!(raw.contains("\"isTelegram\": true"));

    let mut details: Vec<ClientDetail> = read_json(&output.join(DETAILS_FILE));
    details.sort_by_key(|d| d.id);
    assert_eq!(
        details.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![1, 3, 4, 5]
    );
    assert_eq!(details[0].telegram_id, ClientFactory::telegram_id(1));
}

#[tokio::test]
async fn test_run_with_message_broadcasts_after_test_message() {
    let server = DirectoryServer::start(&ClientFactory::mixed_listing(4), &[]).await;
    let config = server.config();
    let client = DirectoryClient::new(config.clone()).unwrap();
    let dir = TempDir::new().unwrap();

    let mut settings = settings(dir.path(), Some("<i>hello</i>"));
    settings.test_recipient = Some("admin".into());
    settings.start_index = 1;

    let report = Pipeline::new(Arc::new(client), config.credentials(), settings)
        .run()
        .await
        .unwrap();

    let sent = report.broadcast.unwrap();
    assert_eq!(sent.total, 3);
    assert_eq!(sent.succeeded, 3);

    let messages = server.sent_messages().await;
    assert_eq!(messages.len(), 4);
    assert_eq!(
        messages.iter().filter(|m| m.telegram_id == "admin").count(),
        1
    );
    assert!(messages.iter().all(|m| m.message_text == "<i>hello</i>"));
}

#[tokio::test]
async fn test_run_halts_when_auth_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"isAuth": false}"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/clients"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = directory_mailer::sdk::ConfigBuilder::new()
        .base_url(&format!("{}/api/", server.uri()))
        .credentials("user", "wrong", "ru")
        .bot_id("7")
        .build();
    let client = DirectoryClient::new(config.clone()).unwrap();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("users_json");

    let err = Pipeline::new(Arc::new(client), config.credentials(), settings(&output, None))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::Auth(_)));
    assert!(!output.exists());
}
