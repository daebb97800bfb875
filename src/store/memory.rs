use super::record::{PanicRecord, StatusUpdate};

use anyhow::Result;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;

/// Durable keyed persistence contract for panic records.
///
/// Mirrors a managed document store: each operation is atomic per key and
/// independently fallible. Services receive an implementation at
/// construction time, so tests can substitute failing fakes.
pub trait RecordStore: Send + Sync + 'static {
    /// Creates or fully overwrites the record keyed by `record.panic_id`.
    fn put(&self, record: PanicRecord) -> impl Future<Output = Result<()>> + Send;

    /// Fetches a record by id, `None` when absent.
    fn get(&self, panic_id: &str) -> impl Future<Output = Result<Option<PanicRecord>>> + Send;

    /// Merges exactly `status`, `processed_at`, and `processing_message`
    /// into the record keyed by `panic_id`, leaving every other attribute
    /// untouched and requiring no prior read. Fails if no record exists
    /// under the key.
    fn update_status(
        &self,
        panic_id: &str,
        update: StatusUpdate,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// In-memory `RecordStore` over a `DashMap`, keyed by `panic_id`.
pub struct MemoryStore {
    table_name: String,
    records: DashMap<String, PanicRecord>,
}

impl MemoryStore {
    pub fn new(table_name: &str) -> Arc<Self> {
        Arc::new(Self {
            table_name: table_name.to_string(),
            records: DashMap::new(),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl RecordStore for MemoryStore {
    async fn put(&self, record: PanicRecord) -> Result<()> {
        tracing::debug!(
            "Storing record {} in table {}",
            record.panic_id,
            self.table_name
        );
        self.records.insert(record.panic_id.clone(), record);
        Ok(())
    }

    async fn get(&self, panic_id: &str) -> Result<Option<PanicRecord>> {
        Ok(self.records.get(panic_id).map(|entry| entry.value().clone()))
    }

    async fn update_status(&self, panic_id: &str, update: StatusUpdate) -> Result<()> {
        match self.records.get_mut(panic_id) {
            Some(mut entry) => {
                let record = entry.value_mut();
                record.status = update.status;
                record.processed_at = Some(update.processed_at);
                record.processing_message = Some(update.processing_message);
                tracing::debug!(
                    "Updated record {} in table {} to {:?}",
                    panic_id,
                    self.table_name,
                    record.status
                );
                Ok(())
            }
            None => Err(anyhow::anyhow!(
                "No record found for panicId {} in table {}",
                panic_id,
                self.table_name
            )),
        }
    }
}
