use axum::Extension;
use billed_core::{BillList, CreateBill};

use crate::api::v1::ApiError;
use crate::api::{AppState, Json};
use crate::mask;

/// Handler for `GET /api/v1/bills`
pub async fn read_all(Extension(state): Extension<AppState>) -> Result<Json<BillList>, ApiError> {
    let bills = state.store.get().await?;
    Ok(bills.into())
}

/// Handler for `POST /api/v1/bills`
pub async fn create(
    Extension(state): Extension<AppState>,
    Json(request): Json<CreateBill>,
) -> Result<Json<BillList>, ApiError> {
    tracing::debug!(
        email = mask::email(&request.email).as_str(),
        date = request.date.as_str(),
        "creating bill"
    );
    let bills = state.store.post(request).await?;
    Ok(bills.into())
}
