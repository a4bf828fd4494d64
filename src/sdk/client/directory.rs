//! Client listing and detail lookups

use super::client::DirectoryClient;
use crate::sdk::{errors::*, session::Session, types::*};
use reqwest::header::AUTHORIZATION;
use tracing::{debug, info, instrument};

impl DirectoryClient {
    /// Fetches one page of clients.
    ///
    /// The page size is fixed by the service; only the page at `offset` is
    /// returned.
    #[instrument(skip(self, session))]
    pub async fn list_clients(&self, session: &Session, offset: u64) -> Result<ClientsPage> {
        info!("Fetching client list");
        let mut url = self.endpoint("clients")?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string());

        let page: ClientsPage = self
            .execute_json(
                self.http_client
                    .get(url)
                    .header(AUTHORIZATION, session.authorization()),
            )
            .await?;

        debug!("Received {} rows of {}", page.rows.len(), page.count);
        Ok(page)
    }

    /// Fetches the detail record for one client
    #[instrument(skip(self, session))]
    pub async fn get_client_detail(&self, session: &Session, id: i64) -> Result<ClientDetail> {
        let mut url = self.endpoint("clients/info")?;
        url.query_pairs_mut().append_pair("id", &id.to_string());

        self.execute_json(
            self.http_client
                .get(url)
                .header(AUTHORIZATION, session.authorization()),
        )
        .await
    }
}

/// Keeps clients that are not deleted and are reachable on Telegram
pub fn filter_clients(page: ClientsPage) -> FilteredClients {
    let total = page.rows.len();
    let retained: Vec<ClientSummary> = page
        .rows
        .into_iter()
        .filter(ClientSummary::is_reachable)
        .collect();
    let dropped = total - retained.len();

    info!("Filtered clients: {} of {} kept", retained.len(), total);
    FilteredClients { retained, dropped }
}
