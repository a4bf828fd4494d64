//! Directory batch jobs
//!
//! The two uses of the batch engine: enriching listed clients with their
//! detail records, and broadcasting a message to enriched clients.

mod broadcast;
mod details;


pub use broadcast::{MessageItem, broadcast, message_items};
pub use details::fetch_client_details;
