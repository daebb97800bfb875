use crate::store::record::{PanicRecord, PanicStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public projection of a panic record.
///
/// Deliberately narrower than the stored entity: `initial_payload` and
/// `ip_address` are retained internally but never exposed through lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanicView {
    pub panic_id: String,
    pub status: PanicStatus,
    pub received_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    pub user_id: String,
    pub app_id_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_message: Option<String>,
}

impl From<PanicRecord> for PanicView {
    fn from(record: PanicRecord) -> Self {
        Self {
            panic_id: record.panic_id,
            status: record.status,
            received_at: record.received_at,
            processed_at: record.processed_at,
            user_id: record.user_id,
            app_id_source: record.app_id_source,
            processing_message: record.processing_message,
        }
    }
}

/// Error response body: `{message}` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
