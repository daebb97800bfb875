//! Queue Transport Module
//!
//! Asynchronous at-least-once message transport connecting intake to the
//! processing worker.
//!
//! ## Core Concepts
//! - **Publish contract**: `PanicQueue::publish(destination, body)` is the
//!   only operation the intake side depends on. The body is an opaque JSON
//!   string; the transport never inspects it.
//! - **Delivery**: messages are handed to the consumer in batches. A
//!   received message becomes invisible for the visibility window; deleting
//!   it acknowledges it, letting the window lapse redelivers it.
//! - **Dead-lettering**: a message received more than the configured maximum
//!   number of times is moved aside instead of being redelivered forever.

pub mod memory;
pub mod types;
