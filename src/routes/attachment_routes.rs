//! Attachment upload URL endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};

use crate::models::{UploadUrlResponse, User};
use crate::state::AppState;
use crate::todos;
use crate::utils::http_helpers::HTTPError;

/// Registers attachment routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/todos/:item_id/attachment", post(generate_upload_url))
}

/// Returns a presigned URL the client uploads the image to directly; the bytes never pass through here.
async fn generate_upload_url(
    user: User,
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<(StatusCode, Json<UploadUrlResponse>), HTTPError> {
    let upload_url = todos::generate_upload_url(
        state.store.as_ref(),
        state.presigner.as_ref(),
        &user.user_id,
        &item_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(UploadUrlResponse { upload_url })))
}
