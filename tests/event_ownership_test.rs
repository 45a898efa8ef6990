//! Ownership enforcement tests
//!
//! Covers:
//! - only the creator may update or delete an event
//! - non-creators receive 403, not 404
//! - unknown ids receive 404

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::Path,
    http::{header, Method, Request, StatusCode},
    routing::delete,
    Extension, Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use validator::Validate;

use eventbook_server::config::AppConfig;
use eventbook_server::domain::event::dto::UpdateEventRequest;
use eventbook_server::mailer::Mailer;
use eventbook_server::utils::auth::AuthUser;
use eventbook_server::utils::jwt::encode_token;
use eventbook_server::utils::{AppError, BaseResponse};
use eventbook_server::AppState;

mod ownership_test_helpers {
    use super::*;

    pub const JWT_SECRET: &str = "test-secret";

    /// event_id -> creator user_id
    pub type OwnerStore = Arc<Mutex<HashMap<i64, i64>>>;

    pub fn test_state() -> AppState {
        let config = AppConfig {
            server_port: 0,
            jwt_secret: JWT_SECRET.to_string(),
            jwt_expiration: 3600,
            send_booking_emails: false,
            mail_relay_url: String::new(),
            mail_relay_token: String::new(),
            mail_from: "noreply@test.local".to_string(),
            frontend_base_url: "http://localhost:3000".to_string(),
        };
        let mailer = Mailer::new(&config);

        AppState {
            db: sea_orm::DatabaseConnection::default(),
            config,
            mailer,
        }
    }

    fn check_owner(owners: &OwnerStore, event_id: i64, user_id: i64) -> Result<(), AppError> {
        let owners = owners.lock().unwrap();
        let creator = owners
            .get(&event_id)
            .ok_or_else(|| AppError::EventNotFound("Event does not exist.".to_string()))?;
        if *creator != user_id {
            return Err(AppError::EventAccessDenied(
                "Only the event creator may modify this event.".to_string(),
            ));
        }
        Ok(())
    }

    /// Test router running the real extractor, validation and ownership
    /// error mapping over an in-memory owner table.
    pub fn create_ownership_test_router(owners: OwnerStore) -> Router {
        async fn update_handler(
            auth_user: AuthUser,
            Path(event_id): Path<i64>,
            Extension(owners): Extension<OwnerStore>,
            Json(req): Json<UpdateEventRequest>,
        ) -> Result<Json<BaseResponse<String>>, AppError> {
            req.validate()?;
            check_owner(&owners, event_id, auth_user.user_id()?)?;
            Ok(Json(BaseResponse::success("updated".to_string())))
        }

        async fn delete_handler(
            auth_user: AuthUser,
            Path(event_id): Path<i64>,
            Extension(owners): Extension<OwnerStore>,
        ) -> Result<Json<BaseResponse<()>>, AppError> {
            check_owner(&owners, event_id, auth_user.user_id()?)?;
            owners.lock().unwrap().remove(&event_id);
            Ok(Json(BaseResponse::success(())))
        }

        Router::new()
            .route(
                "/api/v1/events/:id",
                delete(delete_handler).patch(update_handler),
            )
            .layer(Extension(owners))
            .with_state(test_state())
    }

    pub fn owners_with(event_id: i64, creator: i64) -> OwnerStore {
        let mut map = HashMap::new();
        map.insert(event_id, creator);
        Arc::new(Mutex::new(map))
    }

    pub fn token_for_user(user_id: i64) -> String {
        encode_token(user_id.to_string(), JWT_SECRET, 3600).unwrap()
    }

    pub fn patch_request(event_id: i64, token: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::PATCH)
            .uri(format!("/api/v1/events/{}", event_id))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn delete_request(event_id: i64, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/v1/events/{}", event_id));

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        builder.body(Body::empty()).unwrap()
    }

    pub async fn response_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }
}

use ownership_test_helpers::*;

// ============== Update ==============

#[tokio::test]
async fn creator_can_update_their_event() {
    let owners = owners_with(1, 10);
    let app = create_ownership_test_router(owners);
    let token = token_for_user(10);

    let response = app
        .oneshot(patch_request(1, &token, json!({ "title": "New title" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["isSuccess"], true);
}

#[tokio::test]
async fn non_creator_update_returns_403() {
    let owners = owners_with(1, 10);
    let app = create_ownership_test_router(owners);
    let token = token_for_user(99);

    let response = app
        .oneshot(patch_request(1, &token, json!({ "title": "Hijacked" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = response_json(response).await;
    assert_eq!(json["isSuccess"], false);
    assert_eq!(json["code"], "EVENT4031");
}

#[tokio::test]
async fn update_with_invalid_payload_fails_before_ownership_check() {
    let owners = owners_with(1, 10);
    let app = create_ownership_test_router(owners);
    let token = token_for_user(99);

    // Empty title is invalid, so even the wrong user gets a 400 here
    let response = app
        .oneshot(patch_request(1, &token, json!({ "title": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============== Delete ==============

#[tokio::test]
async fn creator_can_delete_their_event() {
    let owners = owners_with(1, 10);
    let app = create_ownership_test_router(owners.clone());
    let token = token_for_user(10);

    let response = app.oneshot(delete_request(1, Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(owners.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_creator_delete_returns_403_and_keeps_the_event() {
    let owners = owners_with(1, 10);
    let app = create_ownership_test_router(owners.clone());
    let token = token_for_user(99);

    let response = app.oneshot(delete_request(1, Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(owners.lock().unwrap().contains_key(&1));
}

#[tokio::test]
async fn delete_without_token_returns_401() {
    let owners = owners_with(1, 10);
    let app = create_ownership_test_router(owners);

    let response = app.oneshot(delete_request(1, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_of_unknown_event_returns_404() {
    let owners = owners_with(1, 10);
    let app = create_ownership_test_router(owners);
    let token = token_for_user(10);

    let response = app.oneshot(delete_request(42, Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["code"], "EVENT4041");
}
