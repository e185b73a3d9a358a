use crate::app::intake_service::IntakeOutcome;
use crate::domain::profile::RawSubmission;
use crate::transport::http::render;
use crate::transport::http::types::{AppState, ProfileFormRequest};
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;

#[utoipa::path(
    post,
    path = "/process",
    request_body(content = ProfileFormRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Validation errors page, or the stored profile page", body = String, content_type = "text/html"),
        (status = 303, description = "Non-submission request redirected to the entry form"),
        (status = 500, description = "Record store failure page", body = String, content_type = "text/html")
    )
)]
pub async fn process_handler(
    State(state): State<AppState>,
    form: Result<Form<ProfileFormRequest>, FormRejection>,
) -> Response {
    let request = match form {
        Ok(Form(request)) => request,
        Err(rejection) => {
            // An unreadable body is validated as an empty form.
            tracing::warn!(%rejection, "unreadable profile form body");
            ProfileFormRequest::default()
        }
    };

    match state.intake.process(&RawSubmission::from(request)).await {
        IntakeOutcome::Invalid(messages) => {
            (StatusCode::OK, Html(render::errors_page(&messages))).into_response()
        }
        IntakeOutcome::Stored(stored) => {
            (StatusCode::OK, Html(render::success_page(&stored))).into_response()
        }
        IntakeOutcome::StoreFailed { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render::failure_page(message)),
        )
            .into_response(),
    }
}
