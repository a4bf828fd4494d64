//! Mass message sending

use crate::core::batch::{AsyncBatchConfig, AsyncBatchExecutor, BatchResult};
use crate::sdk::{ClientDetail, Delivery, DirectoryApi, Session};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One message addressed to one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageItem {
    /// Client the recipient belongs to
    pub client_id: i64,
    /// Recipient address
    pub recipient: String,
    /// Message text, shared by every item of a broadcast
    pub text: Arc<str>,
}

/// Builds send items for `recipients[start_index..]`.
///
/// An out-of-range `start_index` yields no items.
pub fn message_items(recipients: &[ClientDetail], text: &str, start_index: usize) -> Vec<MessageItem> {
    if start_index > recipients.len() {
        warn!(
            "Start index {} is past the end of {} recipients",
            start_index,
            recipients.len()
        );
        return Vec::new();
    }

    let text: Arc<str> = Arc::from(text);
    recipients[start_index..]
        .iter()
        .map(|detail| MessageItem {
            client_id: detail.id,
            recipient: detail.telegram_id.clone(),
            text: Arc::clone(&text),
        })
        .collect()
}

/// Sends `text` to every recipient from `start_index` on.
///
/// `start_index` lets an interrupted broadcast resume; it only slices the
/// input. Failure indices are relative to the sliced list.
pub async fn broadcast<A>(
    api: Arc<A>,
    session: &Session,
    recipients: &[ClientDetail],
    text: &str,
    start_index: usize,
    config: &AsyncBatchConfig,
) -> BatchResult<Delivery>
where
    A: DirectoryApi + ?Sized + 'static,
{
    let items = message_items(recipients, text, start_index);
    info!(
        "Starting broadcast to {} recipients with {} workers",
        items.len(),
        config.workers
    );
    let session = session.clone();

    AsyncBatchExecutor::new(config.clone())
        .execute(items, move |item: MessageItem| {
            let api = Arc::clone(&api);
            let session = session.clone();
            async move {
                debug!(client_id = item.client_id, recipient = %item.recipient, "Sending message");
                let sent = api.send_message(&session, &item.recipient, &item.text).await;
                sent.map(|()| Delivery {
                    client_id: item.client_id,
                    recipient: item.recipient,
                })
            }
        })
        .await
}
