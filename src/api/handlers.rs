use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::{
    error::LinkError,
    state::AppState,
    types::{CreateLinkRequest, HealthResponse, LinkResponse},
};

// served when the public dir has no 404.html
const FALLBACK_NOT_FOUND_PAGE: &str =
    "<!DOCTYPE html><html><head><title>Link not found</title></head>\
     <body><h1>404</h1><p>This short link does not exist.</p></body></html>";

#[instrument]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: "1.0",
    })
}

#[instrument(skip(state, payload))]
pub async fn create_link(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(payload) => payload.0,
        Err(rejection) => {
            let error_message = match rejection {
                JsonRejection::MissingJsonContentType(_) => {
                    json!({"error": "Expected 'Content-Type: application/json' header"})
                }
                JsonRejection::JsonSyntaxError(_) => json!({"error": "JSON syntax error"}),
                JsonRejection::JsonDataError(_) => json!({"error": "JSON data structure mismatch"}),
                _ => json!({"error": "Unknown JSON parsing error"}),
            };
            error!(error = ?rejection, "JSON parsing error");
            return (StatusCode::BAD_REQUEST, Json(error_message)).into_response();
        }
    };

    match state
        .links
        .create(&payload.url, payload.code.as_deref())
        .await
    {
        Ok(link) => (StatusCode::CREATED, Json(LinkResponse::from(link))).into_response(),
        Err(e) => e.into_response(),
    }
}

#[instrument(skip(state))]
pub async fn list_links(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, LinkError> {
    let links = state.links.list().await?;
    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_link(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, LinkError> {
    let link = state.links.get_by_code(&code).await?;
    Ok(Json(link.into()))
}

#[instrument(skip(state))]
pub async fn delete_link(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, LinkError> {
    state.links.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn redirect(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    match state.links.record_click_and_resolve(&code).await {
        Ok(url) => (StatusCode::FOUND, [(header::LOCATION, url)]).into_response(),
        Err(LinkError::NotFound(_)) => {
            info!(code = %code, "Link not found");
            let page = match tokio::fs::read_to_string(state.public_dir.join("404.html")).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(error = %e, "Failed to read 404 page");
                    FALLBACK_NOT_FOUND_PAGE.to_string()
                }
            };
            (StatusCode::NOT_FOUND, Html(page)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to resolve link");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
        }
    }
}
