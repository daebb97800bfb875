use super::processor::PanicProcessor;
use crate::queue::memory::MemoryQueue;
use crate::store::memory::RecordStore;

use std::sync::Arc;
use std::time::Duration;

/// Long-running loop feeding the processor from the queue transport.
///
/// Acknowledgment follows the batch summary: `done` messages are deleted,
/// `failed` messages are left in flight until their visibility window lapses
/// and the transport redelivers them. A batch-fatal error acknowledges
/// nothing.
pub struct QueueConsumer<S> {
    queue: Arc<MemoryQueue>,
    processor: Arc<PanicProcessor<S>>,
    batch_size: usize,
    poll_interval: Duration,
}

impl<S: RecordStore> QueueConsumer<S> {
    pub fn new(queue: Arc<MemoryQueue>, processor: Arc<PanicProcessor<S>>) -> Arc<Self> {
        Self::with_settings(queue, processor, 10, Duration::from_millis(100))
    }

    pub fn with_settings(
        queue: Arc<MemoryQueue>,
        processor: Arc<PanicProcessor<S>>,
        batch_size: usize,
        poll_interval: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            queue,
            processor,
            batch_size,
            poll_interval,
        })
    }

    /// Spawns the polling loop and returns immediately.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(&self) {
        tracing::info!(
            "Queue consumer started on {} (batch size {})",
            self.queue.queue_url(),
            self.batch_size
        );

        loop {
            let batch = self.queue.receive(self.batch_size);

            if batch.is_empty() {
                // Sleep with jitter to avoid busy-waiting
                let jitter = rand::random::<u64>() % 50;
                tokio::time::sleep(self.poll_interval + Duration::from_millis(jitter)).await;
                continue;
            }

            let batch_len = batch.len();
            tracing::debug!("Consumer received batch of {}", batch_len);

            match self.processor.process_batch(batch).await {
                Ok(summary) => {
                    for message_id in &summary.done {
                        self.queue.delete(message_id);
                    }
                    if !summary.failed.is_empty() {
                        tracing::warn!(
                            "{} of {} messages failed, left for redelivery",
                            summary.failed.len(),
                            batch_len
                        );
                    }
                    tracing::debug!(
                        "Batch complete: {} processed, {} skipped, {} failed",
                        summary.processed,
                        summary.skipped,
                        summary.failed.len()
                    );
                }
                Err(error) => {
                    // Batch abort: nothing acknowledged, the whole batch
                    // redelivers once visibility lapses.
                    tracing::error!("Batch of {} aborted: {}", batch_len, error);
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }
}
