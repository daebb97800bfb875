//! Record Store Module
//!
//! Durable keyed persistence for panic records.
//!
//! ## Core Concepts
//! - **Contract**: `RecordStore` exposes the three operations the pipeline
//!   needs: full overwrite-create (`put`), single-record read (`get`), and a
//!   partial status update that merges named attributes without a prior read.
//! - **Atomicity**: guarantees are per key only. No cross-record or
//!   cross-store transactions exist, which is why the intake sequence treats
//!   write-then-publish as best-effort rather than atomic.
//! - **Implementation**: `MemoryStore` keeps records in a `DashMap`, keyed by
//!   `panic_id`, named by a table name for log attribution.

pub mod memory;
pub mod record;
