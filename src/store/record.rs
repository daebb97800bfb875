use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a panic record.
///
/// Transitions are one-directional: `Received` advances to exactly one
/// terminal state and never regresses. The minimal worker writes
/// `ProcessedSimple`; `Completed` and `Error` are the terminal states of the
/// richer enrichment pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PanicStatus {
    /// Durably recorded by intake, not yet touched by the worker.
    Received,
    /// Terminal: the worker acknowledged the event without enrichment.
    ProcessedSimple,
    /// Terminal: full processing succeeded.
    Completed,
    /// Terminal: processing failed permanently.
    Error,
}

impl PanicStatus {
    /// Whether the worker has acted on the record.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PanicStatus::Received)
    }
}

/// The durable panic event entity.
///
/// Created exclusively by the intake service, mutated (status, processedAt,
/// processingMessage) exclusively by the worker, read-only to lookup, never
/// deleted by this system. `initial_payload` preserves the caller's full
/// original body verbatim for audit and reprocessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanicRecord {
    /// Primary key. Assigned exactly once, by intake, never regenerated.
    pub panic_id: String,
    pub status: PanicStatus,
    /// Set once at creation; immutable.
    pub received_at: DateTime<Utc>,
    /// Set by the worker on successful processing; absent until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    /// Caller-supplied identity, trimmed of surrounding whitespace.
    pub user_id: String,
    pub app_id_source: String,
    /// Best-effort transport-resolved caller address, `"unknown"` otherwise.
    pub ip_address: String,
    /// The full parsed request body as submitted.
    pub initial_payload: serde_json::Value,
    /// Free-text status note written by the worker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_message: Option<String>,
}

/// The exact attribute set the worker may merge into an existing record.
///
/// A deterministic function of the queue message, which is what makes
/// redelivery safe: applying the same update twice reaches the same state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: PanicStatus,
    pub processed_at: DateTime<Utc>,
    pub processing_message: String,
}
