//! SDK data types
//!
//! Wire shapes of the directory service. Field names follow the service's
//! camelCase JSON; missing fields decode to their defaults so a sparse row
//! never fails a whole page.

use serde::{Deserialize, Serialize};

/// Status value the service uses for deleted clients
pub const STATUS_DELETED: i64 = -1;

/// Login credentials sent to the auth endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Interface language
    pub lang: String,
    /// Account login
    pub login: String,
    /// Account password
    pub password: String,
}

/// Auth endpoint response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthResponse {
    /// Whether the service considers the login successful
    pub is_auth: bool,
    /// Bearer token for subsequent calls
    pub access_token: String,
}

/// One directory entry as returned by the listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSummary {
    /// Client identifier
    pub id: i64,
    /// Display caption
    pub caption: String,
    /// Free-form description
    pub description: Option<String>,
    /// Messenger user name
    pub user_name: Option<String>,
    /// Whether the entry is a group chat
    pub is_group: bool,
    /// Numeric status; [`STATUS_DELETED`] marks deleted clients
    pub status: i64,
    /// Bot the client belongs to
    pub bot_id: i64,
    /// Whether the client blocked the bot
    pub block: bool,
    /// Message counter, as a string on the wire
    pub message_count: Option<String>,
    /// Max
    pub max: i64,
    /// Coin balance
    pub coin: i64,
    /// Number of referrals
    pub count_ref: i64,
    /// Reachable on Telegram
    pub is_telegram: bool,
    /// Reachable on VK
    #[serde(rename = "isVK")]
    pub is_vk: bool,
    /// Reachable on Facebook
    pub is_fb: bool,
    /// VK identifier
    pub vk_id: Option<String>,
}

impl ClientSummary {
    /// Whether the client can receive a broadcast: not deleted and on Telegram
    pub fn is_reachable(&self) -> bool {
        self.status != STATUS_DELETED && self.is_telegram
    }
}

/// One page of the listing endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientsPage {
    /// Total number of clients known to the service
    pub count: i64,
    /// Single
    pub single_type: bool,
    /// Rows of this page
    pub rows: Vec<ClientSummary>,
}

/// Listing after the reachability filter
#[derive(Debug, Clone, Default)]
pub struct FilteredClients {
    /// Clients kept for enrichment
    pub retained: Vec<ClientSummary>,
    /// Number of rows dropped by the filter
    pub dropped: usize,
}

impl FilteredClients {
    /// Total rows seen before filtering
    pub fn total(&self) -> usize {
        self.retained.len() + self.dropped
    }
}

/// Per-client detail record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientDetail {
    /// Client identifier
    pub id: i64,
    /// Recipient address used for messaging
    pub telegram_id: String,
    /// Display name
    pub user_name: Option<String>,
}

/// Body of the send-message endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    /// Recipient address
    pub telegram_id: String,
    /// Sending bot
    pub bot_id: String,
    /// Message text (HTML markup allowed by the service)
    pub message_text: String,
}

/// A message delivered to one recipient
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delivery {
    /// Client the message was addressed to
    pub client_id: i64,
    /// Recipient address
    pub recipient: String,
}
