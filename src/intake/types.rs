use crate::error::PanicError;
use serde::{Deserialize, Serialize};

/// Response body returned for every intake outcome, success or failure.
///
/// The `panicId` is always present: it is minted before validation, so even
/// a rejected submission can be traced in the logs by the id the caller saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanicAck {
    pub message: String,
    pub panic_id: String,
}

/// A failed intake attempt: the minted id plus what went wrong.
///
/// Carrying the id outside the error keeps every failure branch able to
/// produce the `{message, panicId}` response shape.
#[derive(Debug)]
pub struct IntakeFailure {
    pub panic_id: String,
    pub error: PanicError,
}
