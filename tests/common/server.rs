//! Fake directory service on top of `wiremock`

use super::fixtures::ClientFactory;
use directory_mailer::sdk::{ClientConfig, ClientSummary, ConfigBuilder, MessageRequest};
use serde_json::json;
use std::collections::HashSet;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Token the fake service hands out
pub const TOKEN: &str = "test-token";

/// Recipient whose messages the fake service rejects
pub const BLOCKED_RECIPIENT: &str = "blocked";

/// Answers detail lookups by echoing the requested id
struct EchoDetail {
    missing: HashSet<i64>,
}

impl Respond for EchoDetail {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let id = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "id")
            .and_then(|(_, value)| value.parse::<i64>().ok());

        match id {
            Some(id) if !self.missing.contains(&id) => {
                ResponseTemplate::new(200).set_body_json(ClientFactory::detail(id))
            }
            _ => ResponseTemplate::new(404).set_body_string("client not found"),
        }
    }
}

/// Accepts every message except those for [`BLOCKED_RECIPIENT`]
struct AcceptMessage;

impl Respond for AcceptMessage {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match request.body_json::<MessageRequest>() {
            Ok(body) if body.telegram_id == BLOCKED_RECIPIENT => {
                ResponseTemplate::new(403).set_body_string("bot was blocked by the user")
            }
            Ok(_) => ResponseTemplate::new(200).set_body_string("ok"),
            Err(_) => ResponseTemplate::new(400).set_body_string("bad body"),
        }
    }
}

/// Running fake service
pub struct DirectoryServer {
    pub server: MockServer,
}

impl DirectoryServer {
    /// Starts a server that authenticates, lists `rows`, and answers detail
    /// lookups for every id except those in `missing`
    pub async fn start(rows: &[ClientSummary], missing: &[i64]) -> Self {
        let server = MockServer::start().await;
        let authorization = format!("JWT {}", TOKEN);

        Mock::given(method("POST"))
            .and(path("/api/auth"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"isAuth": true, "accessToken": TOKEN})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/clients"))
            .and(header("Authorization", authorization.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(ClientFactory::page(rows)))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/clients/info"))
            .and(header("Authorization", authorization.as_str()))
            .respond_with(EchoDetail {
                missing: missing.iter().copied().collect(),
            })
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/clients/message"))
            .and(header("Authorization", authorization.as_str()))
            .respond_with(AcceptMessage)
            .mount(&server)
            .await;

        Self { server }
    }

    /// Client configuration pointing at this server
    pub fn config(&self) -> ClientConfig {
        ConfigBuilder::new()
            .base_url(&format!("{}/api/", self.server.uri()))
            .credentials("user", "secret", "ru")
            .bot_id("7")
            .timeout(5)
            .pacing_ms(1)
            .build()
    }

    /// Bodies of every send-message request received so far
    pub async fn sent_messages(&self) -> Vec<MessageRequest> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == "/api/clients/message")
            .filter_map(|request| request.body_json::<MessageRequest>().ok())
            .collect()
    }

    /// Number of detail lookups received so far
    pub async fn detail_lookups(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == "/api/clients/info")
            .count()
    }
}
