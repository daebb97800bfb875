//! Processing Worker Tests
//!
//! Unit and integration tests for the per-message algorithm, the batch
//! contract, and the consumer loop.
//!
//! ## Test Scopes
//! - **Happy Path**: a queued message advances its record to
//!   `PROCESSED_SIMPLE` with a populated timestamp and note.
//! - **Idempotence**: redelivering the same message reaches the same state.
//! - **Skips**: malformed or id-less messages are dropped without any store
//!   call and without failing the batch.
//! - **Failures**: update failures are reported per message; a missing
//!   configuration aborts the batch.
//! - **Consumer**: the polling loop drains the queue end to end.

#[cfg(test)]
mod tests {
    use crate::config::PanicConfig;
    use crate::error::PanicError;
    use crate::queue::memory::{MemoryQueue, PanicQueue};
    use crate::queue::types::{Delivery, MessageId, QueueMessage};
    use crate::store::memory::{MemoryStore, RecordStore};
    use crate::store::record::{PanicRecord, PanicStatus, StatusUpdate};
    use crate::worker::consumer::QueueConsumer;
    use crate::worker::processor::PanicProcessor;

    use anyhow::Result;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const TABLE: &str = "PanicEventsTable";
    const QUEUE_URL: &str = "memory://PanicProcessingQueue";

    fn test_config() -> PanicConfig {
        PanicConfig::resolved(TABLE, QUEUE_URL)
    }

    fn received_record(panic_id: &str) -> PanicRecord {
        PanicRecord {
            panic_id: panic_id.to_string(),
            status: PanicStatus::Received,
            received_at: Utc::now(),
            processed_at: None,
            user_id: "user-123".to_string(),
            app_id_source: "test-app".to_string(),
            ip_address: "10.0.0.1".to_string(),
            initial_payload: serde_json::json!({"userId": "user-123"}),
            processing_message: None,
        }
    }

    fn delivery_for(panic_id: &str) -> Delivery {
        let message = QueueMessage {
            panic_id: panic_id.to_string(),
            user_id: "user-123".to_string(),
            app_id_source: "test-app".to_string(),
            ip_address: "10.0.0.1".to_string(),
        };
        Delivery {
            message_id: MessageId::new(),
            body: serde_json::to_string(&message).unwrap(),
            receive_count: 1,
        }
    }

    fn raw_delivery(body: &str) -> Delivery {
        Delivery {
            message_id: MessageId::new(),
            body: body.to_string(),
            receive_count: 1,
        }
    }

    /// Store fake that counts update calls and fails for a chosen id.
    struct SelectiveStore {
        updates: Mutex<Vec<String>>,
        fail_for: Option<String>,
    }

    impl SelectiveStore {
        fn new(fail_for: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                updates: Mutex::new(Vec::new()),
                fail_for: fail_for.map(str::to_string),
            })
        }

        fn update_calls(&self) -> Vec<String> {
            self.updates.lock().unwrap().clone()
        }
    }

    impl RecordStore for SelectiveStore {
        async fn put(&self, _record: PanicRecord) -> Result<()> {
            Ok(())
        }

        async fn get(&self, _panic_id: &str) -> Result<Option<PanicRecord>> {
            Ok(None)
        }

        async fn update_status(&self, panic_id: &str, _update: StatusUpdate) -> Result<()> {
            if self.fail_for.as_deref() == Some(panic_id) {
                return Err(anyhow::anyhow!("simulated update outage"));
            }
            self.updates.lock().unwrap().push(panic_id.to_string());
            Ok(())
        }
    }

    // ============================================================
    // TEST 1: successful processing
    // ============================================================

    #[tokio::test]
    async fn test_message_advances_record_to_processed_simple() {
        // ARRANGE
        let store = MemoryStore::new(TABLE);
        store.put(received_record("panic-1")).await.unwrap();
        let processor = PanicProcessor::new(store.clone(), test_config());
        let delivery = delivery_for("panic-1");
        let message_id = delivery.message_id.clone();

        // ACT
        let summary = processor.process_batch(vec![delivery]).await.unwrap();

        // ASSERT: acknowledged, and the record carries the terminal state
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 0);
        assert!(summary.failed.is_empty());
        assert_eq!(summary.done, vec![message_id]);

        let record = store.get("panic-1").await.unwrap().unwrap();
        assert_eq!(record.status, PanicStatus::ProcessedSimple);
        assert!(record.processed_at.is_some());
        let note = record.processing_message.unwrap();
        assert!(note.starts_with("Successfully processed panic event at "));
        // Untouched attributes survive the partial update
        assert_eq!(record.user_id, "user-123");
        assert_eq!(record.initial_payload["userId"], "user-123");
    }

    #[tokio::test]
    async fn test_panic_id_is_trimmed_before_update() {
        let store = MemoryStore::new(TABLE);
        store.put(received_record("panic-1")).await.unwrap();
        let processor = PanicProcessor::new(store.clone(), test_config());

        let summary = processor
            .process_batch(vec![raw_delivery(r#"{"panicId":"  panic-1  "}"#)])
            .await
            .unwrap();

        assert_eq!(summary.processed, 1);
        let record = store.get("panic-1").await.unwrap().unwrap();
        assert_eq!(record.status, PanicStatus::ProcessedSimple);
    }

    // ============================================================
    // TEST 2: idempotence under redelivery
    // ============================================================

    #[tokio::test]
    async fn test_redelivered_message_reaches_same_final_state() {
        // ARRANGE
        let store = MemoryStore::new(TABLE);
        store.put(received_record("panic-1")).await.unwrap();
        let processor = PanicProcessor::new(store.clone(), test_config());
        let delivery = delivery_for("panic-1");

        // ACT: deliver twice, as the transport would after a lost ack
        let first = processor
            .process_batch(vec![delivery.clone()])
            .await
            .unwrap();
        let second = processor.process_batch(vec![delivery]).await.unwrap();

        // ASSERT: both runs succeed and the record stays terminal
        assert_eq!(first.processed, 1);
        assert_eq!(second.processed, 1);

        let record = store.get("panic-1").await.unwrap().unwrap();
        assert_eq!(record.status, PanicStatus::ProcessedSimple);
        assert!(record.processed_at.is_some());
        assert!(record.processing_message.is_some());
    }

    // ============================================================
    // TEST 3: permanently unprocessable messages are skipped
    // ============================================================

    #[tokio::test]
    async fn test_malformed_body_is_skipped_without_store_call() {
        // ARRANGE
        let store = SelectiveStore::new(None);
        let processor = PanicProcessor::new(store.clone(), test_config());
        let delivery = raw_delivery("this is not json");
        let message_id = delivery.message_id.clone();

        // ACT
        let summary = processor.process_batch(vec![delivery]).await.unwrap();

        // ASSERT: acknowledged (never retried), zero update calls
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.processed, 0);
        assert!(summary.failed.is_empty());
        assert_eq!(summary.done, vec![message_id]);
        assert!(store.update_calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_panic_id_is_skipped_without_store_call() {
        let store = SelectiveStore::new(None);
        let processor = PanicProcessor::new(store.clone(), test_config());

        let summary = processor
            .process_batch(vec![
                raw_delivery(r#"{"userId":"user-123"}"#),
                raw_delivery(r#"{"panicId":"   "}"#),
                raw_delivery(r#"{"panicId":42}"#),
            ])
            .await
            .unwrap();

        assert_eq!(summary.skipped, 3);
        assert!(summary.failed.is_empty());
        assert!(store.update_calls().is_empty());
    }

    // ============================================================
    // TEST 4: update failures are isolated and reported separately
    // ============================================================

    #[tokio::test]
    async fn test_update_failure_does_not_block_other_messages() {
        // ARRANGE: the middle message fails, its neighbors must not
        let store = SelectiveStore::new(Some("panic-2"));
        let processor = PanicProcessor::new(store.clone(), test_config());

        let good_one = delivery_for("panic-1");
        let failing = delivery_for("panic-2");
        let good_two = delivery_for("panic-3");
        let failing_id = failing.message_id.clone();

        // ACT
        let summary = processor
            .process_batch(vec![good_one, failing, good_two])
            .await
            .unwrap();

        // ASSERT: two acknowledged, the failure reported on its own
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, vec![failing_id]);
        assert_eq!(store.update_calls(), vec!["panic-1", "panic-3"]);
    }

    #[tokio::test]
    async fn test_update_failure_against_missing_record() {
        // A message referencing a record the intake never wrote fails and
        // stays eligible for redelivery.
        let store = MemoryStore::new(TABLE);
        let processor = PanicProcessor::new(store, test_config());
        let delivery = delivery_for("never-written");
        let message_id = delivery.message_id.clone();

        let summary = processor.process_batch(vec![delivery]).await.unwrap();

        assert_eq!(summary.failed, vec![message_id]);
        assert!(summary.done.is_empty());
    }

    // ============================================================
    // TEST 5: batch-fatal configuration error
    // ============================================================

    #[tokio::test]
    async fn test_missing_configuration_aborts_batch() {
        // ARRANGE
        let store = SelectiveStore::new(None);
        let processor = PanicProcessor::new(store.clone(), PanicConfig::default());

        // ACT
        let result = processor
            .process_batch(vec![delivery_for("panic-1"), delivery_for("panic-2")])
            .await;

        // ASSERT: the whole batch fails upward, no message was attempted
        assert!(matches!(result, Err(PanicError::Configuration(_))));
        assert!(store.update_calls().is_empty());
    }

    // ============================================================
    // TEST 6: consumer loop drains the queue
    // ============================================================

    #[tokio::test]
    async fn test_consumer_processes_published_messages() {
        // ARRANGE: real store, real transport, fast polling
        let store = MemoryStore::new(TABLE);
        store.put(received_record("panic-1")).await.unwrap();
        let queue = MemoryQueue::with_policy(QUEUE_URL, Duration::from_secs(300), 3);
        let processor = PanicProcessor::new(store.clone(), test_config());
        let consumer =
            QueueConsumer::with_settings(queue.clone(), processor, 10, Duration::from_millis(10));

        let body = serde_json::to_string(&QueueMessage {
            panic_id: "panic-1".to_string(),
            user_id: "user-123".to_string(),
            app_id_source: "test-app".to_string(),
            ip_address: "10.0.0.1".to_string(),
        })
        .unwrap();
        queue.publish(QUEUE_URL, body).await.unwrap();

        // ACT
        let handle = consumer.start();
        let mut record = None;
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let current = store.get("panic-1").await.unwrap().unwrap();
            if current.status.is_terminal() {
                record = Some(current);
                break;
            }
        }
        handle.abort();

        // ASSERT: record advanced and the queue is fully drained
        let record = record.expect("consumer should have processed the message");
        assert_eq!(record.status, PanicStatus::ProcessedSimple);
        assert!(record.processed_at.is_some());
        assert_eq!(queue.pending_count(), 0);
        assert_eq!(queue.in_flight_count(), 0);
        assert_eq!(queue.dead_letter_count(), 0);
    }
}
