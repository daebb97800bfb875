//! Processing Worker Module
//!
//! The asynchronous side of the pipeline: consumes queued panic messages and
//! advances the referenced records to their terminal processing state.
//!
//! ## Architecture Overview
//! 1. **Consumption**: `QueueConsumer` polls the transport in batches and
//!    sleeps (with jitter) when the queue is idle.
//! 2. **Processing**: `PanicProcessor` handles each message independently:
//!    parse, extract the record id, apply the partial status update. The
//!    update is a deterministic function of the message, so redelivery of
//!    the same message reaches the same final state.
//! 3. **Outcome reporting**: each message ends up acknowledged (processed or
//!    permanently skipped) or failed; failed messages stay on the queue and
//!    ride the transport's redelivery and dead-letter policy. A missing
//!    store configuration aborts the whole batch before any message is
//!    touched.
//!
//! ## Submodules
//! - **`processor`**: per-message algorithm and the batch contract.
//! - **`consumer`**: the long-running polling loop feeding the processor.

pub mod consumer;
pub mod processor;

#[cfg(test)]
mod tests;
