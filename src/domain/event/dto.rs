use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::entity::event;

/// Accepted event modes.
const EVENT_MODES: [&str; 2] = ["online", "in_person"];

fn validate_event_mode(mode: &str) -> Result<(), ValidationError> {
    if EVENT_MODES.contains(&mode.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("event_mode_unknown"))
    }
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("price_negative"));
    }
    Ok(())
}

/// Listing query parameters. Everything is optional; see the filter module
/// for the matching semantics. Query params stay snake_case, matching the
/// public listing URL contract.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EventQueryParams {
    /// Case-insensitive exact city match
    pub city: Option<String>,
    /// Case-insensitive exact category match
    pub event_category: Option<String>,
    /// Case-insensitive exact mode match ("online" / "in_person")
    pub event_mode: Option<String>,
    /// Substring match on title or description
    pub search: Option<String>,
    /// `today`, `tomorrow`, `this_weekend` or `YYYY-MM-DD`
    pub date: Option<String>,
    /// Sort column, `-` prefix for descending
    pub ordering: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "city is required"))]
    pub city: String,

    /// ISO datetime, e.g. `2026-09-12T19:30:00`
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,

    #[validate(custom(
        function = "validate_event_mode",
        message = "eventMode must be 'online' or 'in_person'"
    ))]
    pub event_mode: String,

    pub image: Option<String>,

    #[validate(length(min = 1, max = 100, message = "eventCategory is required"))]
    pub event_category: String,

    #[validate(custom(function = "validate_price", message = "price must not be negative"))]
    pub price: Decimal,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100, message = "city must not be empty"))]
    pub city: Option<String>,

    pub date: Option<String>,

    #[validate(custom(
        function = "validate_event_mode",
        message = "eventMode must be 'online' or 'in_person'"
    ))]
    pub event_mode: Option<String>,

    pub image: Option<String>,

    #[validate(length(min = 1, max = 100, message = "eventCategory must not be empty"))]
    pub event_category: Option<String>,

    #[validate(custom(function = "validate_price", message = "price must not be negative"))]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub city: String,
    pub date: String,
    /// Creator's first name only
    pub created_by: String,
    pub event_mode: String,
    pub image: Option<String>,
    pub event_category: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub number_of_bookings: i32,
    /// Total like count
    pub likes: i64,
    /// Whether the requesting user likes this event; false when anonymous
    pub liked: bool,
}

impl EventResponse {
    pub fn from_model(model: event::Model, created_by: String, likes: i64, liked: bool) -> Self {
        Self {
            id: model.event_id,
            title: model.title,
            description: model.description,
            city: model.city,
            date: model.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            created_by,
            event_mode: model.event_mode,
            image: model.image,
            event_category: model.event_category,
            price: model.price,
            number_of_bookings: model.number_of_bookings,
            likes,
            liked,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    /// New membership state after the toggle
    pub liked: bool,
    /// New total like count
    pub likes: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEventListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<EventResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEventResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: EventResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessLikeResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: LikeResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_replacement_requires_every_field() {
        // description is missing: a PUT body must not parse, a PATCH body may
        let body = serde_json::json!({
            "title": "Jazz night",
            "city": "Sydney",
            "date": "2026-09-12T19:30:00",
            "eventMode": "online",
            "eventCategory": "Music",
            "price": "25.00"
        });

        assert!(serde_json::from_value::<CreateEventRequest>(body.clone()).is_err());
        assert!(serde_json::from_value::<UpdateEventRequest>(body).is_ok());
    }
}
