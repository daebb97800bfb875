use super::types::PanicView;
use crate::config::PanicConfig;
use crate::error::PanicError;
use crate::store::memory::RecordStore;

use std::sync::Arc;

/// Single-record retrieval. Performs no mutation.
pub struct LookupService<S> {
    store: Arc<S>,
    config: PanicConfig,
}

impl<S: RecordStore> LookupService<S> {
    pub fn new(store: Arc<S>, config: PanicConfig) -> Arc<Self> {
        Arc::new(Self { store, config })
    }

    pub async fn get_panic(&self, panic_id: &str) -> Result<PanicView, PanicError> {
        self.config.table_name().map_err(|error| {
            tracing::error!("Record store table is not configured");
            error
        })?;

        let panic_id = panic_id.trim();
        if panic_id.is_empty() {
            tracing::warn!("Path parameter \"id\" (panicId) is missing");
            return Err(PanicError::Validation(
                "Panic ID is missing in the request path.".to_string(),
            ));
        }

        match self.store.get(panic_id).await {
            Ok(Some(record)) => {
                tracing::debug!("[panicId: {}] Retrieved panic event", panic_id);
                Ok(PanicView::from(record))
            }
            Ok(None) => {
                tracing::warn!("[panicId: {}] Panic event not found", panic_id);
                Err(PanicError::NotFound)
            }
            Err(source) => {
                tracing::error!(
                    "[panicId: {}] Error retrieving panic event: {}",
                    panic_id,
                    source
                );
                Err(PanicError::StoreRead(source))
            }
        }
    }
}
