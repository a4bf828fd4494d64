//! Authentication

use super::client::DirectoryClient;
use crate::sdk::{errors::*, session::Session, types::*};
use tracing::{info, instrument, warn};

impl DirectoryClient {
    /// Exchanges credentials for a [`Session`].
    ///
    /// The service's `isAuth` flag is recorded on the session but not
    /// enforced; an empty token is an [`SDKError::AuthError`].
    #[instrument(skip_all, fields(login = %credentials.login))]
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        info!("Requesting access token");
        let url = self.endpoint("auth")?;

        let response: AuthResponse = self
            .execute_json(self.http_client.post(url).json(credentials))
            .await?;

        if !response.is_auth {
            warn!("Service reported isAuth=false");
        }

        let session = Session::with_flag(response.access_token, response.is_auth)?;
        info!("Access token received");
        Ok(session)
    }

    /// Authenticates with the credentials from the client configuration
    pub async fn login(&self) -> Result<Session> {
        let credentials = self.config.credentials();
        self.authenticate(&credentials).await
    }
}
