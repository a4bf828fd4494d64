//! Per-client detail enrichment

use crate::core::batch::{AsyncBatchConfig, AsyncBatchExecutor, BatchResult};
use crate::sdk::{ClientDetail, ClientSummary, DirectoryApi, Session};
use std::sync::Arc;
use tracing::{debug, info};

/// Fetches the detail record of every client through the paced worker pool.
///
/// Successes are returned in listing order regardless of which call finished
/// first, so a position in the result names the same client on every run.
/// Failures are indexed by position in `clients`.
pub async fn fetch_client_details<A>(
    api: Arc<A>,
    session: &Session,
    clients: Vec<ClientSummary>,
    config: &AsyncBatchConfig,
) -> BatchResult<ClientDetail>
where
    A: DirectoryApi + ?Sized + 'static,
{
    info!(
        "Fetching details for {} clients with {} workers",
        clients.len(),
        config.workers
    );
    let session = session.clone();

    let fetched = AsyncBatchExecutor::new(config.clone())
        .execute(
            clients.into_iter().enumerate(),
            move |(position, client): (usize, ClientSummary)| {
                let api = Arc::clone(&api);
                let session = session.clone();
                async move {
                    debug!(client_id = client.id, "Fetching client detail");
                    let detail = api.get_client_detail(&session, client.id).await;
                    detail.map(|detail| (position, detail))
                }
            },
        )
        .await;

    let BatchResult {
        mut successes,
        failures,
        summary,
    } = fetched;
    successes.sort_unstable_by_key(|(position, _)| *position);

    BatchResult {
        successes: successes.into_iter().map(|(_, detail)| detail).collect(),
        failures,
        summary,
    }
}
