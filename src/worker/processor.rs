use crate::config::PanicConfig;
use crate::error::PanicError;
use crate::queue::types::{Delivery, MessageId};
use crate::store::memory::RecordStore;
use crate::store::record::{PanicStatus, StatusUpdate};

use chrono::Utc;
use std::sync::Arc;

/// Per-batch outcome report.
///
/// `done` holds every message that must not be delivered again: successful
/// updates and permanently unprocessable input alike. `failed` holds the
/// messages whose store update failed; they are left unacknowledged so the
/// transport redelivers them.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub done: Vec<MessageId>,
    pub failed: Vec<MessageId>,
    pub processed: usize,
    pub skipped: usize,
}

enum Disposition {
    Updated,
    Skipped,
}

/// Applies queued panic messages to the record store.
pub struct PanicProcessor<S> {
    store: Arc<S>,
    config: PanicConfig,
}

impl<S: RecordStore> PanicProcessor<S> {
    pub fn new(store: Arc<S>, config: PanicConfig) -> Arc<Self> {
        Arc::new(Self { store, config })
    }

    /// Processes a batch of deliveries, each message independently.
    ///
    /// A missing store configuration is batch-fatal: the error propagates
    /// before any message is touched, nothing is acknowledged, and the
    /// transport redelivers the entire batch.
    pub async fn process_batch(&self, batch: Vec<Delivery>) -> Result<BatchSummary, PanicError> {
        if let Err(error) = self.config.table_name() {
            tracing::error!(
                "Critical: record store table is not configured, aborting batch of {}",
                batch.len()
            );
            return Err(error);
        }

        let mut summary = BatchSummary::default();

        for delivery in &batch {
            match self.process_message(delivery).await {
                Ok(Disposition::Updated) => {
                    summary.processed += 1;
                    summary.done.push(delivery.message_id.clone());
                }
                Ok(Disposition::Skipped) => {
                    summary.skipped += 1;
                    summary.done.push(delivery.message_id.clone());
                }
                Err(error) => {
                    tracing::error!(
                        "[message: {}] Processing failed, leaving for redelivery: {}",
                        delivery.message_id.0,
                        error
                    );
                    summary.failed.push(delivery.message_id.clone());
                }
            }
        }

        Ok(summary)
    }

    async fn process_message(&self, delivery: &Delivery) -> Result<Disposition, PanicError> {
        // Malformed input can never succeed; retrying cannot fix it, so it
        // is logged and dropped rather than left to block the queue.
        let payload: serde_json::Value = match serde_json::from_str(&delivery.body) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::error!(
                    "[message: {}] Failed to parse message body {:?}: {}",
                    delivery.message_id.0,
                    delivery.body,
                    error
                );
                return Ok(Disposition::Skipped);
            }
        };

        let panic_id = match payload
            .get("panicId")
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            Some(id) => id.to_string(),
            None => {
                tracing::error!(
                    "[message: {}] Missing or invalid panicId in message body: {}",
                    delivery.message_id.0,
                    payload
                );
                return Ok(Disposition::Skipped);
            }
        };

        tracing::info!(
            "[panicId: {}, message: {}] Processing panic event (receive {})",
            panic_id,
            delivery.message_id.0,
            delivery.receive_count
        );

        let processed_at = Utc::now();
        let update = StatusUpdate {
            status: PanicStatus::ProcessedSimple,
            processed_at,
            processing_message: format!(
                "Successfully processed panic event at {}.",
                processed_at.to_rfc3339()
            ),
        };

        self.store
            .update_status(&panic_id, update)
            .await
            .map_err(|source| PanicError::StoreUpdate {
                panic_id: panic_id.clone(),
                source,
            })?;

        tracing::info!(
            "[panicId: {}, message: {}] Updated status to PROCESSED_SIMPLE",
            panic_id,
            delivery.message_id.0
        );

        Ok(Disposition::Updated)
    }
}
