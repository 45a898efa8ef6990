pub mod config;
pub mod domain;
pub mod mailer;
pub mod state;
pub mod utils;

pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::event::handler::list_events,
        domain::event::handler::get_event,
        domain::event::handler::my_events,
        domain::event::handler::create_event,
        domain::event::handler::replace_event,
        domain::event::handler::update_event,
        domain::event::handler::delete_event,
        domain::event::handler::toggle_like,
        domain::booking::handler::create_booking,
        domain::user::handler::register,
        domain::user::handler::activate,
        domain::user::handler::reset_password,
        domain::user::handler::reset_password_confirm,
        domain::user::handler::login,
        domain::user::handler::me,
    ),
    components(
        schemas(
            domain::event::dto::CreateEventRequest,
            domain::event::dto::UpdateEventRequest,
            domain::event::dto::EventResponse,
            domain::event::dto::LikeResponse,
            domain::event::dto::SuccessEventListResponse,
            domain::event::dto::SuccessEventResponse,
            domain::event::dto::SuccessLikeResponse,
            domain::booking::dto::CreateBookingRequest,
            domain::booking::dto::BookingResponse,
            domain::booking::dto::SuccessBookingResponse,
            domain::user::dto::RegisterRequest,
            domain::user::dto::RegisterResponse,
            domain::user::dto::ActivationRequest,
            domain::user::dto::ResetPasswordRequest,
            domain::user::dto::ResetPasswordConfirmRequest,
            domain::user::dto::LoginRequest,
            domain::user::dto::TokenResponse,
            domain::user::dto::CurrentUserResponse,
            domain::user::dto::SuccessRegisterResponse,
            domain::user::dto::SuccessTokenResponse,
            domain::user::dto::SuccessCurrentUserResponse,
            utils::response::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Event", description = "Event catalog"),
        (name = "Booking", description = "Ticket bookings"),
        (name = "Auth", description = "Registration, activation and login")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api/v1/events",
            get(domain::event::handler::list_events).post(domain::event::handler::create_event),
        )
        .route(
            "/api/v1/events/my_events",
            get(domain::event::handler::my_events),
        )
        .route(
            "/api/v1/events/:id",
            get(domain::event::handler::get_event)
                .put(domain::event::handler::replace_event)
                .patch(domain::event::handler::update_event)
                .delete(domain::event::handler::delete_event),
        )
        .route(
            "/api/v1/events/:id/like",
            post(domain::event::handler::toggle_like),
        )
        .route(
            "/api/v1/bookings",
            post(domain::booking::handler::create_booking),
        )
        .route("/api/v1/auth/users", post(domain::user::handler::register))
        .route(
            "/api/v1/auth/users/activation",
            post(domain::user::handler::activate),
        )
        .route(
            "/api/v1/auth/users/reset_password",
            post(domain::user::handler::reset_password),
        )
        .route(
            "/api/v1/auth/users/reset_password_confirm",
            post(domain::user::handler::reset_password_confirm),
        )
        .route(
            "/api/v1/auth/token/login",
            post(domain::user::handler::login),
        )
        .route("/api/v1/users/me", get(domain::user::handler::me))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
