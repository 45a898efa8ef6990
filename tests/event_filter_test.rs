//! Listing filter tests driven through the HTTP layer.
//!
//! Exercises the real `Query<EventQueryParams>` deserialization plus the
//! condition builder, asserting on the resulting SQL condition structure.

use axum::{
    body::Body,
    extract::Query,
    http::{Method, Request, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use eventbook_server::domain::event::dto::EventQueryParams;
use eventbook_server::domain::event::filter::{build_condition, parse_ordering};
use eventbook_server::utils::BaseResponse;

mod filter_test_helpers {
    use super::*;

    pub fn reference_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    /// Router that echoes the condition a listing request would run with.
    /// The Debug rendering is stable enough to compare two requests.
    pub fn create_filter_test_router() -> Router {
        async fn test_handler(
            Query(params): Query<EventQueryParams>,
        ) -> Json<BaseResponse<String>> {
            let condition = build_condition(&params, reference_day());
            let ordering = params
                .ordering
                .as_deref()
                .and_then(parse_ordering)
                .map(|(column, order)| format!("{:?} {:?}", column, order));

            Json(BaseResponse::success(format!(
                "{:?} | {:?}",
                condition, ordering
            )))
        }

        Router::new().route("/api/v1/events", get(test_handler))
    }

    pub async fn condition_for(app: Router, query: &str) -> String {
        let uri = if query.is_empty() {
            "/api/v1/events".to_string()
        } else {
            format!("/api/v1/events?{}", query)
        };
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        json["result"].as_str().unwrap().to_string()
    }
}

use filter_test_helpers::*;

#[tokio::test]
async fn city_filter_is_recognized_from_the_query_string() {
    let app = create_filter_test_router();

    let with_city = condition_for(app.clone(), "city=Sydney").await;
    let without = condition_for(app, "").await;

    assert_ne!(with_city, without);
    assert!(with_city.contains("sydney"), "got: {}", with_city);
}

#[tokio::test]
async fn filters_combine() {
    let app = create_filter_test_router();

    let combined = condition_for(
        app.clone(),
        "city=Sydney&event_category=Music&event_mode=online",
    )
    .await;
    let city_only = condition_for(app, "city=Sydney").await;

    assert!(combined.len() > city_only.len());
    assert!(combined.contains("music"));
    assert!(combined.contains("online"));
}

#[tokio::test]
async fn unparseable_date_matches_the_no_date_condition() {
    let app = create_filter_test_router();

    let bad_date = condition_for(app.clone(), "city=Sydney&date=soon-ish").await;
    let no_date = condition_for(app, "city=Sydney").await;

    assert_eq!(bad_date, no_date);
}

#[tokio::test]
async fn today_narrows_the_condition() {
    let app = create_filter_test_router();

    let with_date = condition_for(app.clone(), "date=today").await;
    let without = condition_for(app, "").await;

    assert_ne!(with_date, without);
    // Reference day bounds from the helper
    assert!(with_date.contains("2026-08-28"), "got: {}", with_date);
}

#[tokio::test]
async fn weekend_covers_saturday_and_sunday() {
    let app = create_filter_test_router();

    let weekend = condition_for(app, "date=this_weekend").await;

    // 2026-08-28 is a Friday; the weekend range is Sat 29th up to Mon 31st
    assert!(weekend.contains("2026-08-29"), "got: {}", weekend);
    assert!(weekend.contains("2026-08-31"), "got: {}", weekend);
}

#[tokio::test]
async fn search_matches_title_and_description() {
    let app = create_filter_test_router();

    let search = condition_for(app, "search=Jazz").await;

    assert!(search.contains("%jazz%"), "got: {}", search);
}

#[tokio::test]
async fn ordering_outside_the_whitelist_is_dropped() {
    let app = create_filter_test_router();

    let unknown = condition_for(app.clone(), "ordering=created_by").await;
    let valid = condition_for(app, "ordering=-price").await;

    assert!(unknown.ends_with("None"), "got: {}", unknown);
    assert!(valid.contains("Price"), "got: {}", valid);
    assert!(valid.contains("Desc"), "got: {}", valid);
}

#[tokio::test]
async fn unknown_query_params_are_ignored() {
    let app = create_filter_test_router();

    let extra = condition_for(app.clone(), "city=Sydney&mystery=42").await;
    let plain = condition_for(app, "city=Sydney").await;

    assert_eq!(extra, plain);
}
