//! Test fixtures and data factories
//!
//! Provides factory methods for listing rows and detail records with
//! sensible defaults.

use directory_mailer::sdk::{ClientDetail, ClientSummary, STATUS_DELETED};
use serde_json::{Value, json};

/// Factory for listing rows and detail records
pub struct ClientFactory;

impl ClientFactory {
    /// A reachable Telegram client
    pub fn reachable(id: i64) -> ClientSummary {
        ClientSummary {
            id,
            caption: format!("Client {}", id),
            user_name: Some(format!("client{}", id)),
            status: 1,
            bot_id: 7,
            is_telegram: true,
            ..Default::default()
        }
    }

    /// A deleted client that still claims a Telegram channel
    pub fn deleted(id: i64) -> ClientSummary {
        ClientSummary {
            status: STATUS_DELETED,
            ..Self::reachable(id)
        }
    }

    /// A VK-only client
    pub fn vk_only(id: i64) -> ClientSummary {
        ClientSummary {
            is_telegram: false,
            is_vk: true,
            ..Self::reachable(id)
        }
    }

    /// A listing of `reachable` live clients followed by one deleted and one
    /// VK-only client
    pub fn mixed_listing(reachable: i64) -> Vec<ClientSummary> {
        let mut rows: Vec<ClientSummary> = (1..=reachable).map(Self::reachable).collect();
        rows.push(Self::deleted(reachable + 1));
        rows.push(Self::vk_only(reachable + 2));
        rows
    }

    /// Detail record the fake server returns for `id`
    pub fn detail(id: i64) -> ClientDetail {
        ClientDetail {
            id,
            telegram_id: Self::telegram_id(id),
            user_name: Some(format!("client{}", id)),
        }
    }

    /// Recipient address derived from an id
    pub fn telegram_id(id: i64) -> String {
        format!("{}", 100_000 + id)
    }

    /// Listing response body
    pub fn page(rows: &[ClientSummary]) -> Value {
        json!({
            "count": rows.len(),
            "singleType": false,
            "rows": rows,
        })
    }
}
