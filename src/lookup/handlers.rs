use super::service::LookupService;
use super::types::ErrorBody;
use crate::store::memory::RecordStore;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;

/// `GET /panic/{id}`: fetch the public view of a panic record.
pub async fn handle_get_panic<S: RecordStore>(
    Extension(service): Extension<Arc<LookupService<S>>>,
    Path(panic_id): Path<String>,
) -> Response {
    match service.get_panic(&panic_id).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => (
            error.status_code(),
            Json(ErrorBody {
                message: error.to_string(),
            }),
        )
            .into_response(),
    }
}
