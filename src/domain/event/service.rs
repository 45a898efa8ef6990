use std::collections::{HashMap, HashSet};

use chrono::{NaiveDateTime, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::domain::booking::entity::event_booking;
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;

use super::dto::{
    CreateEventRequest, EventQueryParams, EventResponse, LikeResponse, UpdateEventRequest,
};
use super::entity::{event, event_like};
use super::filter;

pub struct EventService;

impl EventService {
    /// Filtered catalog listing. `viewer` personalizes the `liked` flag and
    /// may be absent for anonymous requests.
    pub async fn list_events(
        state: AppState,
        viewer: Option<i64>,
        params: EventQueryParams,
    ) -> Result<Vec<EventResponse>, AppError> {
        let today = Utc::now().date_naive();
        let condition = filter::build_condition(&params, today);

        let mut query = event::Entity::find().filter(condition);

        // Unknown ordering values fall back to natural (primary key) order
        if let Some(ordering) = params.ordering.as_deref() {
            if let Some((column, order)) = filter::parse_ordering(ordering) {
                query = query.order_by(column, order);
            }
        }

        let events = query.all(&state.db).await?;

        Self::build_responses(&state, events, viewer).await
    }

    /// Single event by id.
    pub async fn get_event(
        state: AppState,
        viewer: Option<i64>,
        event_id: i64,
    ) -> Result<EventResponse, AppError> {
        let model = Self::find_event(&state, event_id).await?;

        let responses = Self::build_responses(&state, vec![model], viewer).await?;
        responses
            .into_iter()
            .next()
            .ok_or_else(|| AppError::InternalError("Event response mapping failed.".to_string()))
    }

    /// Events created by the calling user.
    pub async fn my_events(state: AppState, user_id: i64) -> Result<Vec<EventResponse>, AppError> {
        let events = event::Entity::find()
            .filter(event::Column::CreatedBy.eq(user_id))
            .all(&state.db)
            .await?;

        Self::build_responses(&state, events, Some(user_id)).await
    }

    /// Create an event. The creator is always the authenticated caller,
    /// never a client-supplied field.
    pub async fn create_event(
        state: AppState,
        user_id: i64,
        req: CreateEventRequest,
    ) -> Result<EventResponse, AppError> {
        let date = parse_event_date(&req.date)?;

        let creator = user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unknown user.".to_string()))?;

        let now = Utc::now().naive_utc();
        let model = event::ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            city: Set(req.city),
            date: Set(date),
            created_by: Set(user_id),
            event_mode: Set(req.event_mode.to_lowercase()),
            image: Set(req.image),
            event_category: Set(req.event_category),
            price: Set(req.price),
            number_of_bookings: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await?;

        info!(
            event_id = inserted.event_id,
            user_id = user_id,
            "Event created"
        );

        Ok(EventResponse::from_model(
            inserted,
            creator.first_name,
            0,
            false,
        ))
    }

    /// Update an event. Only the creator may update; everyone else gets a
    /// 403 (existence is not hidden). Absent fields keep their value.
    pub async fn update_event(
        state: AppState,
        user_id: i64,
        event_id: i64,
        req: UpdateEventRequest,
    ) -> Result<EventResponse, AppError> {
        let model = Self::find_event_owned(&state, user_id, event_id).await?;

        let mut active: event::ActiveModel = model.into();
        if let Some(title) = req.title {
            active.title = Set(title);
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        if let Some(city) = req.city {
            active.city = Set(city);
        }
        if let Some(date) = req.date {
            active.date = Set(parse_event_date(&date)?);
        }
        if let Some(event_mode) = req.event_mode {
            active.event_mode = Set(event_mode.to_lowercase());
        }
        if let Some(image) = req.image {
            active.image = Set(Some(image));
        }
        if let Some(event_category) = req.event_category {
            active.event_category = Set(event_category);
        }
        if let Some(price) = req.price {
            active.price = Set(price);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;

        info!(event_id = event_id, user_id = user_id, "Event updated");

        let responses = Self::build_responses(&state, vec![updated], Some(user_id)).await?;
        responses
            .into_iter()
            .next()
            .ok_or_else(|| AppError::InternalError("Event response mapping failed.".to_string()))
    }

    /// Replace an event wholesale. PUT semantics: every mutable field comes
    /// from the request, nothing is carried over from the stored row.
    pub async fn replace_event(
        state: AppState,
        user_id: i64,
        event_id: i64,
        req: CreateEventRequest,
    ) -> Result<EventResponse, AppError> {
        let model = Self::find_event_owned(&state, user_id, event_id).await?;

        let mut active: event::ActiveModel = model.into();
        active.title = Set(req.title);
        active.description = Set(req.description);
        active.city = Set(req.city);
        active.date = Set(parse_event_date(&req.date)?);
        active.event_mode = Set(req.event_mode.to_lowercase());
        active.image = Set(req.image);
        active.event_category = Set(req.event_category);
        active.price = Set(req.price);
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;

        info!(event_id = event_id, user_id = user_id, "Event replaced");

        let responses = Self::build_responses(&state, vec![updated], Some(user_id)).await?;
        responses
            .into_iter()
            .next()
            .ok_or_else(|| AppError::InternalError("Event response mapping failed.".to_string()))
    }

    /// Delete an event together with its likes and bookings. Creator only.
    pub async fn delete_event(
        state: AppState,
        user_id: i64,
        event_id: i64,
    ) -> Result<(), AppError> {
        let model = Self::find_event_owned(&state, user_id, event_id).await?;

        let txn = state.db.begin().await?;

        let likes_deleted = event_like::Entity::delete_many()
            .filter(event_like::Column::EventId.eq(event_id))
            .exec(&txn)
            .await?;

        let bookings_deleted = event_booking::Entity::delete_many()
            .filter(event_booking::Column::EventId.eq(event_id))
            .exec(&txn)
            .await?;

        model.delete(&txn).await?;

        txn.commit().await?;

        info!(
            event_id = event_id,
            user_id = user_id,
            likes_deleted = likes_deleted.rows_affected,
            bookings_deleted = bookings_deleted.rows_affected,
            "Event deleted"
        );

        Ok(())
    }

    /// Toggle the caller's membership in the event's liked set. Each call
    /// flips the state; two calls restore the original.
    pub async fn toggle_like(
        state: AppState,
        user_id: i64,
        event_id: i64,
    ) -> Result<LikeResponse, AppError> {
        Self::find_event(&state, event_id).await?;

        let existing = event_like::Entity::find()
            .filter(event_like::Column::UserId.eq(user_id))
            .filter(event_like::Column::EventId.eq(event_id))
            .one(&state.db)
            .await?;

        let liked = match existing {
            Some(like) => {
                like.delete(&state.db).await?;
                false
            }
            None => {
                let like = event_like::ActiveModel {
                    user_id: Set(user_id),
                    event_id: Set(event_id),
                    ..Default::default()
                };
                // A concurrent toggle can hit the unique index; the like
                // exists either way, so report the liked state.
                match like.insert(&state.db).await {
                    Ok(_) => {}
                    Err(e) => {
                        let msg = e.to_string().to_lowercase();
                        if !(msg.contains("duplicate")
                            || msg.contains("unique")
                            || msg.contains("constraint"))
                        {
                            return Err(e.into());
                        }
                    }
                }
                true
            }
        };

        let likes = event_like::Entity::find()
            .filter(event_like::Column::EventId.eq(event_id))
            .count(&state.db)
            .await? as i64;

        info!(
            event_id = event_id,
            user_id = user_id,
            liked = liked,
            likes = likes,
            "Like toggled"
        );

        Ok(LikeResponse { liked, likes })
    }

    /// Fetch an event or 404.
    async fn find_event(state: &AppState, event_id: i64) -> Result<event::Model, AppError> {
        event::Entity::find_by_id(event_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::EventNotFound("Event does not exist.".to_string()))
    }

    /// Fetch an event and enforce ownership: 404 when missing, 403 when the
    /// caller is not the creator.
    async fn find_event_owned(
        state: &AppState,
        user_id: i64,
        event_id: i64,
    ) -> Result<event::Model, AppError> {
        let model = Self::find_event(state, event_id).await?;

        if model.created_by != user_id {
            return Err(AppError::EventAccessDenied(
                "Only the event creator may modify this event.".to_string(),
            ));
        }

        Ok(model)
    }

    /// Assemble listing responses: creator first names, like counts and the
    /// viewer's liked set are each fetched with one batch query.
    async fn build_responses(
        state: &AppState,
        events: Vec<event::Model>,
        viewer: Option<i64>,
    ) -> Result<Vec<EventResponse>, AppError> {
        if events.is_empty() {
            return Ok(vec![]);
        }

        let event_ids: Vec<i64> = events.iter().map(|e| e.event_id).collect();
        let creator_ids: Vec<i64> = events.iter().map(|e| e.created_by).collect();

        let creators = user::Entity::find()
            .filter(user::Column::UserId.is_in(creator_ids))
            .all(&state.db)
            .await?;
        let creator_names: HashMap<i64, String> = creators
            .into_iter()
            .map(|u| (u.user_id, u.first_name))
            .collect();

        let all_likes = event_like::Entity::find()
            .filter(event_like::Column::EventId.is_in(event_ids))
            .all(&state.db)
            .await?;

        let mut like_counts: HashMap<i64, i64> = HashMap::new();
        let mut viewer_liked: HashSet<i64> = HashSet::new();
        for like in &all_likes {
            *like_counts.entry(like.event_id).or_insert(0) += 1;
            if Some(like.user_id) == viewer {
                viewer_liked.insert(like.event_id);
            }
        }

        let responses = events
            .into_iter()
            .map(|model| {
                let created_by = creator_names
                    .get(&model.created_by)
                    .cloned()
                    .unwrap_or_default();
                let likes = *like_counts.get(&model.event_id).unwrap_or(&0);
                let liked = viewer_liked.contains(&model.event_id);
                EventResponse::from_model(model, created_by, likes, liked)
            })
            .collect();

        Ok(responses)
    }
}

/// Parse the event date field. Accepts ISO datetimes with or without
/// seconds, a space separator, or a bare date (midnight).
pub fn parse_event_date(value: &str) -> Result<NaiveDateTime, AppError> {
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(day) = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN));
    }

    Err(AppError::ValidationError(format!(
        "date: '{}' is not a valid ISO date or datetime",
        value
    )))
}
