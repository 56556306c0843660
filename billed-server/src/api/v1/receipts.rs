use axum::body::Bytes;
use axum::extract::Path;
use axum::Extension;

use crate::api::v1::ApiError;
use crate::api::{AppState, Json};
use crate::store::UploadedReceipt;

/// Handler for `PUT /api/v1/receipts/:file_name`
///
/// The request body is the raw file content. Only `.jpg`, `.jpeg` and
/// `.png` names are accepted.
pub async fn upload(
    Path(file_name): Path<String>,
    Extension(state): Extension<AppState>,
    content: Bytes,
) -> Result<Json<UploadedReceipt>, ApiError> {
    let receipt = state.store.upload(&file_name, content).await?;
    Ok(receipt.into())
}
