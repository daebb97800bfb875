use super::types::{Delivery, MessageId};

use anyhow::Result;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Publish-side contract of the message transport.
///
/// This is all the intake service ever sees of the queue: a destination URL
/// and an opaque body, returning an acknowledgment id or failing. Delivery,
/// redelivery, and dead-lettering are transport policy, not caller concerns.
pub trait PanicQueue: Send + Sync + 'static {
    fn publish(
        &self,
        destination: &str,
        body: String,
    ) -> impl Future<Output = Result<MessageId>> + Send;
}

struct QueuedEntry {
    message_id: MessageId,
    body: String,
    receive_count: u32,
}

struct InFlightEntry {
    entry: QueuedEntry,
    invisible_until: Instant,
}

/// In-process at-least-once queue transport.
///
/// Published messages wait in a FIFO pending queue. `receive` moves them to
/// an in-flight set where they stay invisible for the visibility window;
/// `delete` acknowledges them. Messages whose window lapses undeleted return
/// to the pending queue, and messages received more than `max_receive_count`
/// times are moved to the dead-letter buffer instead of redelivered.
pub struct MemoryQueue {
    queue_url: String,
    visibility: Duration,
    max_receive_count: u32,
    pending: Mutex<VecDeque<QueuedEntry>>,
    in_flight: DashMap<String, InFlightEntry>,
    dead_letters: Mutex<Vec<QueuedEntry>>,
}

impl MemoryQueue {
    /// Creates a queue with the production defaults: 300 second visibility
    /// window, dead-letter after 3 receives.
    pub fn new(queue_url: &str) -> Arc<Self> {
        Self::with_policy(queue_url, Duration::from_secs(300), 3)
    }

    pub fn with_policy(
        queue_url: &str,
        visibility: Duration,
        max_receive_count: u32,
    ) -> Arc<Self> {
        Arc::new(Self {
            queue_url: queue_url.to_string(),
            visibility,
            max_receive_count,
            pending: Mutex::new(VecDeque::new()),
            in_flight: DashMap::new(),
            dead_letters: Mutex::new(Vec::new()),
        })
    }

    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    /// Receives up to `max` messages, making each invisible for the
    /// visibility window. Expired in-flight messages are requeued first, so
    /// a single consumer polling this method observes redeliveries without
    /// any background timer.
    pub fn receive(&self, max: usize) -> Vec<Delivery> {
        self.requeue_expired();

        let mut batch = Vec::new();
        let mut pending = self.pending.lock().expect("queue lock poisoned");

        while batch.len() < max {
            let Some(mut entry) = pending.pop_front() else {
                break;
            };
            entry.receive_count += 1;

            if entry.receive_count > self.max_receive_count {
                tracing::warn!(
                    "Message {} exceeded {} receives, moving to dead-letter buffer",
                    entry.message_id.0,
                    self.max_receive_count
                );
                self.dead_letters
                    .lock()
                    .expect("dead-letter lock poisoned")
                    .push(entry);
                continue;
            }

            let delivery = Delivery {
                message_id: entry.message_id.clone(),
                body: entry.body.clone(),
                receive_count: entry.receive_count,
            };
            self.in_flight.insert(
                entry.message_id.0.clone(),
                InFlightEntry {
                    entry,
                    invisible_until: Instant::now() + self.visibility,
                },
            );
            batch.push(delivery);
        }

        batch
    }

    /// Acknowledges an in-flight message, removing it permanently.
    /// Returns false if the message was not in flight (already deleted or
    /// already returned to the pending queue).
    pub fn delete(&self, message_id: &MessageId) -> bool {
        self.in_flight.remove(&message_id.0).is_some()
    }

    fn requeue_expired(&self) {
        let now = Instant::now();
        let expired: Vec<String> = self
            .in_flight
            .iter()
            .filter(|entry| entry.value().invisible_until <= now)
            .map(|entry| entry.key().clone())
            .collect();

        for key in expired {
            if let Some((_, in_flight)) = self.in_flight.remove(&key) {
                tracing::debug!(
                    "Visibility window lapsed for message {}, requeueing",
                    in_flight.entry.message_id.0
                );
                self.pending
                    .lock()
                    .expect("queue lock poisoned")
                    .push_back(in_flight.entry);
            }
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().expect("queue lock poisoned").len()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn dead_letter_count(&self) -> usize {
        self.dead_letters.lock().expect("dead-letter lock poisoned").len()
    }
}

impl PanicQueue for MemoryQueue {
    async fn publish(&self, destination: &str, body: String) -> Result<MessageId> {
        if destination != self.queue_url {
            return Err(anyhow::anyhow!(
                "Queue not found for destination: {}",
                destination
            ));
        }

        let message_id = MessageId::new();
        self.pending
            .lock()
            .expect("queue lock poisoned")
            .push_back(QueuedEntry {
                message_id: message_id.clone(),
                body,
                receive_count: 0,
            });

        tracing::debug!("Published message {} to {}", message_id.0, self.queue_url);
        Ok(message_id)
    }
}
