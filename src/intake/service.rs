use super::types::{IntakeFailure, PanicAck};
use crate::config::PanicConfig;
use crate::error::PanicError;
use crate::queue::memory::PanicQueue;
use crate::queue::types::QueueMessage;
use crate::store::memory::RecordStore;
use crate::store::record::{PanicRecord, PanicStatus};

use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;

/// The intake core: validation, durable write, then queue publish.
///
/// The two side effects are sequential and independently fallible. The
/// write-then-publish pair is best effort, not a transaction: a publish
/// failure after a successful write leaves a `RECEIVED` record that nothing
/// will process, which is why that branch is reported distinctly, with the
/// record's id, instead of as a generic internal error.
pub struct IntakeService<S, Q> {
    store: Arc<S>,
    queue: Arc<Q>,
    config: PanicConfig,
}

impl<S: RecordStore, Q: PanicQueue> IntakeService<S, Q> {
    pub fn new(store: Arc<S>, queue: Arc<Q>, config: PanicConfig) -> Arc<Self> {
        Arc::new(Self {
            store,
            queue,
            config,
        })
    }

    /// Processes one submission. `body` is the raw request body (`None` or
    /// blank counts as missing); `source_addr` is the transport-resolved
    /// peer address, if the transport offers one.
    pub async fn create_panic(
        &self,
        body: Option<&str>,
        source_addr: Option<SocketAddr>,
    ) -> Result<PanicAck, IntakeFailure> {
        let panic_id = uuid::Uuid::new_v4().to_string();
        tracing::info!("[panicId: {}] Panic intake invoked", panic_id);

        self.try_create(&panic_id, body, source_addr)
            .await
            .map_err(|error| IntakeFailure {
                panic_id: panic_id.clone(),
                error,
            })
    }

    async fn try_create(
        &self,
        panic_id: &str,
        body: Option<&str>,
        source_addr: Option<SocketAddr>,
    ) -> Result<PanicAck, PanicError> {
        self.config.table_name().map_err(|error| {
            tracing::error!("[panicId: {}] Record store table is not configured", panic_id);
            error
        })?;
        let queue_url = self
            .config
            .queue_url()
            .map_err(|error| {
                tracing::error!("[panicId: {}] Queue destination is not configured", panic_id);
                error
            })?
            .to_string();

        let raw = body
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| {
                tracing::warn!("[panicId: {}] Request body is missing", panic_id);
                PanicError::Validation("Request body is required.".to_string())
            })?;

        let payload: serde_json::Value = serde_json::from_str(raw).map_err(|error| {
            tracing::warn!("[panicId: {}] Failed to parse request body: {}", panic_id, error);
            PanicError::Validation("Invalid JSON format in request body.".to_string())
        })?;

        let user_id = required_field(&payload, "userId").ok_or_else(|| {
            tracing::warn!("[panicId: {}] Validation failed: userId missing or invalid", panic_id);
            PanicError::Validation("userId is required and must be a non-empty string.".to_string())
        })?;
        let app_id_source = required_field(&payload, "appIdSource").ok_or_else(|| {
            tracing::warn!(
                "[panicId: {}] Validation failed: appIdSource missing or invalid",
                panic_id
            );
            PanicError::Validation(
                "appIdSource is required and must be a non-empty string.".to_string(),
            )
        })?;

        // The authoritative address comes from the transport; any ipAddress
        // field in the body stays informational inside initial_payload.
        let ip_address = source_addr
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let record = PanicRecord {
            panic_id: panic_id.to_string(),
            status: PanicStatus::Received,
            received_at: Utc::now(),
            processed_at: None,
            user_id,
            app_id_source,
            ip_address,
            initial_payload: payload,
            processing_message: None,
        };

        let message = QueueMessage {
            panic_id: record.panic_id.clone(),
            user_id: record.user_id.clone(),
            app_id_source: record.app_id_source.clone(),
            ip_address: record.ip_address.clone(),
        };

        // 1. Durable write. On failure nothing has been published and no
        // partial state exists, so the caller can safely retry.
        self.store.put(record).await.map_err(|source| {
            tracing::error!("[panicId: {}] Failed to store panic record: {}", panic_id, source);
            PanicError::StoreWrite(source)
        })?;
        tracing::info!("[panicId: {}] Stored initial panic record", panic_id);

        // 2. Queue publish, only after the write observably completed.
        let message_body = serde_json::to_string(&message).map_err(|source| PanicError::QueuePublish {
            panic_id: panic_id.to_string(),
            source: source.into(),
        })?;
        self.queue
            .publish(&queue_url, message_body)
            .await
            .map_err(|source| {
                tracing::error!(
                    "[panicId: {}] Failed to publish after saving; this panic event may never be processed: {}",
                    panic_id,
                    source
                );
                PanicError::QueuePublish {
                    panic_id: panic_id.to_string(),
                    source,
                }
            })?;
        tracing::info!("[panicId: {}] Published processing message", panic_id);

        Ok(PanicAck {
            message: "Panic event received successfully.".to_string(),
            panic_id: panic_id.to_string(),
        })
    }
}

/// A field passes when it exists, is a string, and is non-empty after
/// trimming; the trimmed value is what gets stored.
fn required_field(payload: &serde_json::Value, key: &str) -> Option<String> {
    payload
        .get(key)?
        .as_str()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
