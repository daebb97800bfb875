//! Panic Event Intake Service Library
//!
//! This library crate defines the core modules of the panic intake pipeline.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of three request-scoped services over two shared
//! resources:
//!
//! - **`intake`**: The event intake boundary. Validates an inbound panic
//!   event, durably records it with status `RECEIVED`, and publishes a
//!   reduced processing message to the queue (write-then-publish, with the
//!   partial-failure branch reported distinctly).
//! - **`worker`**: The asynchronous processing side. Consumes queued
//!   messages in batches and idempotently advances each referenced record to
//!   its terminal processing state.
//! - **`lookup`**: The read-only side. Fetches a record by identifier and
//!   projects it to the public view.
//! - **`store`**: The durable record layer. Defines the `RecordStore`
//!   contract (put / get / partial status update) and an in-memory
//!   implementation.
//! - **`queue`**: The message transport layer. Defines the `PanicQueue`
//!   publish contract and an in-process at-least-once transport with
//!   visibility timeouts, redelivery, and dead-lettering.

pub mod config;
pub mod error;
pub mod intake;
pub mod lookup;
pub mod queue;
pub mod store;
pub mod worker;
