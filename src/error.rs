//! Error taxonomy for the panic intake pipeline.
//!
//! Every failure that can cross a service boundary is one of these variants.
//! The `Display` text is the user-visible `message` string returned in HTTP
//! response bodies; `status_code` gives the HTTP mapping. Dependency-level
//! causes are carried as `anyhow::Error` sources so logs keep the full chain.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanicError {
    /// A required endpoint (record-store table or queue destination) was not
    /// resolved. Fatal for the invocation: internal error response for
    /// intake/lookup, batch abort for the worker. Never retried internally.
    #[error("Internal server error: Missing configuration.")]
    Configuration(&'static str),

    /// Client-caused rejection. The payload is the human-readable reason.
    #[error("{0}")]
    Validation(String),

    /// Lookup miss: no record exists under the requested identifier.
    #[error("Panic event not found.")]
    NotFound,

    /// The durable write failed before anything was published. No partial
    /// state exists in the store; the caller can safely retry the request.
    #[error("Failed to save panic event data.")]
    StoreWrite(#[source] anyhow::Error),

    /// The record was written but the processing message was never queued.
    /// The record now exists as `RECEIVED` with nothing driving it forward,
    /// so the response carries the id for manual remediation.
    #[error("Panic event created but failed to queue for processing. Please contact support.")]
    QueuePublish {
        panic_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// Store read failure during lookup.
    #[error("Failed to retrieve panic event data.")]
    StoreRead(#[source] anyhow::Error),

    /// The worker could not apply the status update. Must propagate so the
    /// message stays on the queue and the transport redelivers it.
    #[error("Failed to update panic record {panic_id}.")]
    StoreUpdate {
        panic_id: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PanicError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PanicError::Validation(_) => StatusCode::BAD_REQUEST,
            PanicError::NotFound => StatusCode::NOT_FOUND,
            PanicError::Configuration(_)
            | PanicError::StoreWrite(_)
            | PanicError::QueuePublish { .. }
            | PanicError::StoreRead(_)
            | PanicError::StoreUpdate { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, PanicError>;
