//! Message sending

use super::client::DirectoryClient;
use crate::sdk::{errors::*, session::Session, types::*};
use reqwest::header::AUTHORIZATION;
use tracing::{debug, error, instrument};

impl DirectoryClient {
    /// Sends `text` to one recipient through the configured bot.
    ///
    /// Any status other than 200 is returned as [`SDKError::ApiError`] with
    /// the raw response body.
    #[instrument(skip(self, session, text))]
    pub async fn send_message(&self, session: &Session, recipient: &str, text: &str) -> Result<()> {
        if recipient.is_empty() {
            return Err(SDKError::InvalidRequest("empty recipient".to_string()));
        }

        let url = self.endpoint("clients/message")?;
        let body = MessageRequest {
            telegram_id: recipient.to_string(),
            bot_id: self.config.bot_id.clone(),
            message_text: text.to_string(),
        };

        let (status, body) = self
            .execute(
                self.http_client
                    .post(url)
                    .header(AUTHORIZATION, session.authorization())
                    .json(&body),
            )
            .await?;

        debug!("Server response: {}", body);

        if status != 200 {
            error!("Send failed with status {}", status);
            return Err(SDKError::api(status, body));
        }
        Ok(())
    }
}
