//! Content API endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use super::{success_with, ApiResult, Empty};
use crate::auth::SessionUser;
use crate::errors::AppError;
use crate::models::{SiteContent, UpdateContentRequest};
use crate::AppState;

/// GET /api/content - Both content documents, `{en, fr}`.
pub async fn get_content(State(state): State<AppState>) -> Result<Json<SiteContent>, AppError> {
    let content = state.repo.get_site_content().await?;
    Ok(Json(content))
}

/// POST /api/content - Update the `en` and/or `fr` documents. Any signed-in role.
pub async fn update_content(
    State(state): State<AppState>,
    Extension(caller): Extension<SessionUser>,
    payload: Result<Json<UpdateContentRequest>, JsonRejection>,
) -> ApiResult<Empty> {
    let Json(request) = payload?;

    let written = state.repo.update_content(&request).await?;

    let languages: Vec<&str> = written.iter().map(|d| d.language.as_str()).collect();
    tracing::info!(actor = %caller.username, ?languages, "Content updated");
    success_with(Empty {}, "Content updated successfully")
}
