use super::service::IntakeService;
use super::types::PanicAck;
use crate::queue::memory::PanicQueue;
use crate::store::memory::RecordStore;

use axum::extract::ConnectInfo;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::net::SocketAddr;
use std::sync::Arc;

/// `POST /panic`: submit a panic event.
///
/// Every branch answers with `{message, panicId}`; the service decides the
/// outcome, the handler only maps it onto the HTTP surface.
pub async fn handle_create_panic<S, Q>(
    Extension(service): Extension<Arc<IntakeService<S, Q>>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    body: String,
) -> (StatusCode, Json<PanicAck>)
where
    S: RecordStore,
    Q: PanicQueue,
{
    let source_addr = connect_info.map(|ConnectInfo(addr)| addr);

    match service.create_panic(Some(body.as_str()), source_addr).await {
        Ok(ack) => (StatusCode::CREATED, Json(ack)),
        Err(failure) => (
            failure.error.status_code(),
            Json(PanicAck {
                message: failure.error.to_string(),
                panic_id: failure.panic_id,
            }),
        ),
    }
}
