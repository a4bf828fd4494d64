//! Remote operations as a trait

use super::client::DirectoryClient;
use crate::sdk::{errors::Result, session::Session, types::*};
use async_trait::async_trait;

/// The four remote operations of the directory service.
///
/// Batch jobs and the run driver only talk to this trait, so a different
/// transport or a test double can stand in for [`DirectoryClient`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Exchange credentials for a session
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session>;

    /// Fetch one page of clients
    async fn list_clients(&self, session: &Session, offset: u64) -> Result<ClientsPage>;

    /// Fetch one client's detail record
    async fn get_client_detail(&self, session: &Session, id: i64) -> Result<ClientDetail>;

    /// Send a message to one recipient
    async fn send_message(&self, session: &Session, recipient: &str, text: &str) -> Result<()>;
}

#[async_trait]
impl DirectoryApi for DirectoryClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        DirectoryClient::authenticate(self, credentials).await
    }

    async fn list_clients(&self, session: &Session, offset: u64) -> Result<ClientsPage> {
        DirectoryClient::list_clients(self, session, offset).await
    }

    async fn get_client_detail(&self, session: &Session, id: i64) -> Result<ClientDetail> {
        DirectoryClient::get_client_detail(self, session, id).await
    }

    async fn send_message(&self, session: &Session, recipient: &str, text: &str) -> Result<()> {
        DirectoryClient::send_message(self, session, recipient, text).await
    }
}
