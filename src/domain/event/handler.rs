use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::state::AppState;
use crate::utils::auth::{AuthUser, MaybeAuthUser};
use crate::utils::error::AppError;
use crate::utils::{BaseResponse, ErrorResponse};

use super::dto::{
    CreateEventRequest, EventQueryParams, EventResponse, LikeResponse, SuccessEventListResponse,
    SuccessEventResponse, SuccessLikeResponse, UpdateEventRequest,
};
use super::service::EventService;

/// Event listing
///
/// Public. Filters combine with AND; unparseable `date` values are ignored.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    params(EventQueryParams),
    responses(
        (status = 200, description = "Filtered event list", body = SuccessEventListResponse)
    ),
    tag = "Event"
)]
pub async fn list_events(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(params): Query<EventQueryParams>,
) -> Result<Json<BaseResponse<Vec<EventResponse>>>, AppError> {
    let result = EventService::list_events(state, viewer.user_id(), params).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Event detail
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    params(("id" = i64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event detail", body = SuccessEventResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn get_event(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(event_id): Path<i64>,
) -> Result<Json<BaseResponse<EventResponse>>, AppError> {
    let result = EventService::get_event(state, viewer.user_id(), event_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Events created by the caller
#[utoipa::path(
    get,
    path = "/api/v1/events/my_events",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's events", body = SuccessEventListResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn my_events(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<Vec<EventResponse>>>, AppError> {
    let user_id = user.user_id()?;

    let result = EventService::my_events(state, user_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Create an event
///
/// The creator is taken from the access token, not the request body.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = CreateEventRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Event created", body = SuccessEventResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn create_event(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<BaseResponse<EventResponse>>), AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = EventService::create_event(state, user_id, req).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}

/// Replace an event (creator only)
///
/// PUT demands the full representation; use PATCH for partial updates.
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    params(("id" = i64, Path, description = "Event id")),
    request_body = CreateEventRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event replaced", body = SuccessEventResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 403, description = "Caller is not the creator", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn replace_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<i64>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<BaseResponse<EventResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = EventService::replace_event(state, user_id, event_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Update an event (creator only)
#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}",
    params(("id" = i64, Path, description = "Event id")),
    request_body = UpdateEventRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event updated", body = SuccessEventResponse),
        (status = 403, description = "Caller is not the creator", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn update_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<i64>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<BaseResponse<EventResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = EventService::update_event(state, user_id, event_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Delete an event (creator only)
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    params(("id" = i64, Path, description = "Event id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 403, description = "Caller is not the creator", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_id = user.user_id()?;

    EventService::delete_event(state, user_id, event_id).await?;

    Ok(Json(BaseResponse::success(())))
}

/// Toggle a like on an event
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/like",
    params(("id" = i64, Path, description = "Event id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "New like state", body = SuccessLikeResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn toggle_like(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<i64>,
) -> Result<Json<BaseResponse<LikeResponse>>, AppError> {
    let user_id = user.user_id()?;

    let result = EventService::toggle_like(state, user_id, event_id).await?;

    Ok(Json(BaseResponse::success(result)))
}
