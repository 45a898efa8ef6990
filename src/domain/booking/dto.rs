use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::event_booking;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Id of the event being booked
    pub event: i64,

    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(range(min = 1, message = "quantity must be a positive integer"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    pub event: i64,
    pub name: String,
    pub email: String,
    pub quantity: i32,
    pub created_at: String,
}

impl From<event_booking::Model> for BookingResponse {
    fn from(model: event_booking::Model) -> Self {
        Self {
            id: model.booking_id,
            event: model.event_id,
            name: model.name,
            email: model.email,
            quantity: model.quantity,
            created_at: model.created_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBookingResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: BookingResponse,
}
