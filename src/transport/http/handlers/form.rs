use crate::transport::http::render::{self, FORM_PATH, STYLES_CSS};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect};

#[utoipa::path(
    get,
    path = "/form.html",
    responses(
        (status = 200, description = "Profile entry form", body = String, content_type = "text/html")
    )
)]
pub async fn form_page_handler() -> Html<String> {
    Html(render::form_page())
}

/// Sends anything that is not a form submission to the entry form.
pub async fn redirect_to_form() -> Redirect {
    Redirect::to(FORM_PATH)
}

pub async fn styles_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLES_CSS)
}
