use crate::transport::http::handlers::{form, health, process};
use crate::transport::http::render::{FORM_PATH, STYLES_PATH};
use crate::transport::http::types::{ApiResponse, AppState, ProfileFormRequest};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        form::form_page_handler,
        process::process_handler
    ),
    components(schemas(ApiResponse, ProfileFormRequest))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(form::redirect_to_form))
        .route(FORM_PATH, get(form::form_page_handler))
        .route(STYLES_PATH, get(form::styles_handler))
        .route(
            "/process",
            post(process::process_handler).fallback(form::redirect_to_form),
        )
        .route("/health", get(health::healthcheck_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
