use serde::{Deserialize, Serialize};

/// Unique identifier for a published message within the transport.
///
/// Wrapper around a UUID string; used by the consumer to acknowledge
/// (delete) a delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// The reduced projection of a panic record published for asynchronous
/// processing.
///
/// Deliberately minimal: it references the durable record by id and carries
/// the identity fields the worker logs, never the full payload. The record
/// store remains the single source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMessage {
    pub panic_id: String,
    pub user_id: String,
    pub app_id_source: String,
    pub ip_address: String,
}

/// A message as handed to the worker: the raw body plus transport metadata.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub message_id: MessageId,
    /// Raw JSON body exactly as published. Parsing is the worker's problem,
    /// which is what makes the malformed-message skip path possible.
    pub body: String,
    /// How many times this message has been received, this delivery included.
    pub receive_count: u32,
}
