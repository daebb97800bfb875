//! Intake Service Module
//!
//! The event intake boundary: accepts an inbound panic event and hands it to
//! the asynchronous processing side.
//!
//! ## Workflow
//! 1. **Identify**: A fresh `panicId` is minted on entry, before validation,
//!    so every response can reference it.
//! 2. **Validate**: configuration, body presence, JSON shape, and the two
//!    required identity fields, short-circuiting on the first failure.
//! 3. **Record**: The full event is written to the record store with status
//!    `RECEIVED`.
//! 4. **Enqueue**: A reduced message referencing the record is published for
//!    the worker. A publish failure after a successful write is reported as
//!    its own distinct outcome; the write is not rolled back.

pub mod handlers;
pub mod service;
pub mod types;
