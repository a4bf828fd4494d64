//! The HTTP client driven through the batch jobs
//!
//! Every test talks to a local `wiremock` server over real HTTP.

use crate::common::server::BLOCKED_RECIPIENT;
use crate::common::{ClientFactory, DirectoryServer};
use directory_mailer::core::batch::{AsyncBatchConfig, BatchError};
use directory_mailer::core::directory::{broadcast, fetch_client_details};
use directory_mailer::sdk::{ClientDetail, DirectoryApi, DirectoryClient, filter_clients};
use std::sync::Arc;
use std::time::Duration;

fn batch(workers: usize) -> AsyncBatchConfig {
    AsyncBatchConfig::new()
        .with_workers(workers)
        .with_pacing(Duration::from_millis(1))
        .with_call_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn test_login_list_and_filter() {
    let server = DirectoryServer::start(&ClientFactory::mixed_listing(3), &[]).await;
    let client = DirectoryClient::new(server.config()).unwrap();

    let session = client.login().await.unwrap();
    assert!(session.reported_authenticated());

    let page = client.list_clients(&session, 0).await.unwrap();
    assert_eq!(page.count, 5);

    let filtered = filter_clients(page);
    assert_eq!(filtered.dropped, 2);
    assert_eq!(
        filtered.retained.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn test_fetch_details_over_http() {
    let rows = ClientFactory::mixed_listing(8);
    let server = DirectoryServer::start(&rows, &[4]).await;
    let client = Arc::new(DirectoryClient::new(server.config()).unwrap());
    let session = client.login().await.unwrap();

    let retained = filter_clients(client.list_clients(&session, 0).await.unwrap()).retained;
    let result = fetch_client_details(Arc::clone(&client), &session, retained, &batch(3)).await;

    assert_eq!(result.summary.total, 8);
    assert_eq!(result.summary.succeeded, 7);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].index, 3);
    assert!(matches!(
        &result.failures[0].error,
        BatchError::Operation { message, retryable: false } if message.contains("404")
    ));

    let mut ids: Vec<i64> = result.successes.iter().map(|d| d.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3, 5, 6, 7, 8]);
    assert_eq!(server.detail_lookups().await, 8);
}

#[tokio::test]
async fn test_broadcast_resumes_from_start_index() {
    let server = DirectoryServer::start(&[], &[]).await;
    let client = Arc::new(DirectoryClient::new(server.config()).unwrap());
    let session = client.login().await.unwrap();

    let recipients: Vec<ClientDetail> = (0..10).map(ClientFactory::detail).collect();
    let result = broadcast(
        Arc::clone(&client),
        &session,
        &recipients,
        "<b>ATTENTION</b>",
        4,
        &batch(3),
    )
    .await;

    assert_eq!(result.summary.total, 6);
    assert!(result.is_clean());

    let sent = server.sent_messages().await;
    assert_eq!(sent.len(), 6);
    assert!(sent.iter().all(|m| m.bot_id == "7"));
    assert!(sent.iter().all(|m| m.message_text == "<b>ATTENTION</b>"));

    let mut recipients: Vec<String> = sent.into_iter().map(|m| m.telegram_id).collect();
    recipients.sort();
    let mut expected: Vec<String> = (4..10).map(ClientFactory::telegram_id).collect();
    expected.sort();
    assert_eq!(recipients, expected);
}

#[tokio::test]
async fn test_broadcast_rejection_is_isolated() {
    let server = DirectoryServer::start(&[], &[]).await;
    let client = Arc::new(DirectoryClient::new(server.config()).unwrap());
    let session = client.login().await.unwrap();

    let mut recipients: Vec<ClientDetail> = (0..4).map(ClientFactory::detail).collect();
    recipients[2].telegram_id = BLOCKED_RECIPIENT.to_string();

    let result = broadcast(Arc::clone(&client), &session, &recipients, "hi", 0, &batch(2)).await;

    assert_eq!(result.successes.len(), 3);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].index, 2);
    assert!(result.failures[0].error.to_string().contains("403"));
    assert_eq!(server.sent_messages().await.len(), 4);
}

#[tokio::test]
async fn test_trait_object_drives_batches() {
    let server = DirectoryServer::start(&ClientFactory::mixed_listing(2), &[]).await;
    let client: Arc<dyn DirectoryApi> = Arc::new(DirectoryClient::new(server.config()).unwrap());
    let session = client
        .authenticate(&server.config().credentials())
        .await
        .unwrap();

    let retained = filter_clients(client.list_clients(&session, 0).await.unwrap()).retained;
    let result = fetch_client_details(Arc::clone(&client), &session, retained, &batch(50)).await;

    assert!(result.is_clean());
    assert_eq!(result.summary.workers, 2);
}
