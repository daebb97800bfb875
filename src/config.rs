//! Runtime configuration.
//!
//! Two endpoints must be resolved before any request can be served: the
//! record-store table name and the queue destination URL. They are read from
//! the environment once at startup, but presence is checked per invocation
//! (per request for intake/lookup, per batch for the worker) so an
//! unconfigured deployment surfaces the internal-error contract instead of
//! failing in unrelated ways.

use crate::error::PanicError;

pub const TABLE_NAME_VAR: &str = "PANIC_TABLE_NAME";
pub const QUEUE_URL_VAR: &str = "PANIC_QUEUE_URL";

#[derive(Debug, Clone, Default)]
pub struct PanicConfig {
    pub table_name: Option<String>,
    pub queue_url: Option<String>,
}

impl PanicConfig {
    /// Resolves both endpoints from the environment. Blank values count as
    /// absent.
    pub fn from_env() -> Self {
        Self {
            table_name: read_var(TABLE_NAME_VAR),
            queue_url: read_var(QUEUE_URL_VAR),
        }
    }

    pub fn resolved(table_name: &str, queue_url: &str) -> Self {
        Self {
            table_name: Some(table_name.to_string()),
            queue_url: Some(queue_url.to_string()),
        }
    }

    pub fn table_name(&self) -> Result<&str, PanicError> {
        self.table_name
            .as_deref()
            .ok_or(PanicError::Configuration(TABLE_NAME_VAR))
    }

    pub fn queue_url(&self) -> Result<&str, PanicError> {
        self.queue_url
            .as_deref()
            .ok_or(PanicError::Configuration(QUEUE_URL_VAR))
    }
}

fn read_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
