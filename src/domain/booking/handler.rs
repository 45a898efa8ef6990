use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::{BaseResponse, ErrorResponse};

use super::dto::{BookingResponse, CreateBookingRequest, SuccessBookingResponse};
use super::service::BookingService;

/// Book tickets for an event
///
/// Open to unauthenticated clients. Validation failures return per-field
/// messages and persist nothing.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = SuccessBookingResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse)
    ),
    tag = "Booking"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BaseResponse<BookingResponse>>), AppError> {
    req.validate()?;

    let result = BookingService::create_booking(state, req).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}
