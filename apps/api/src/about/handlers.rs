//! Axum route handlers for the About page.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::about::editor::{AboutView, Draft};
use crate::about::models::AboutSection;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveAboutRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SaveAboutResponse {
    pub success: bool,
}

/// GET /api/about
///
/// Plain-text body with the current bio.
pub async fn handle_get_about_content(State(state): State<AppState>) -> String {
    state.about.lock().await.record().about_me.clone()
}

/// POST /api/about
pub async fn handle_save_about_content(
    State(state): State<AppState>,
    Json(request): Json<SaveAboutRequest>,
) -> Result<Json<SaveAboutResponse>, AppError> {
    state
        .about
        .lock()
        .await
        .replace_about_me(request.content)
        .await?;
    Ok(Json(SaveAboutResponse { success: true }))
}

/// GET /api/v1/about
pub async fn handle_get_about(State(state): State<AppState>) -> Json<AboutView> {
    Json(state.about.lock().await.view())
}

/// POST /api/v1/about/edit/:section
pub async fn handle_begin_edit(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<AboutView>, AppError> {
    let section: AboutSection = section.parse().map_err(AppError::NotFound)?;
    let mut page = state.about.lock().await;
    page.begin_edit(section);
    Ok(Json(page.view()))
}

/// PUT /api/v1/about/draft
pub async fn handle_update_draft(
    State(state): State<AppState>,
    Json(draft): Json<Draft>,
) -> Result<Json<AboutView>, AppError> {
    let mut page = state.about.lock().await;
    page.update_draft(draft)?;
    Ok(Json(page.view()))
}

/// POST /api/v1/about/save
pub async fn handle_save(State(state): State<AppState>) -> Result<Json<AboutView>, AppError> {
    let mut page = state.about.lock().await;
    page.save().await?;
    Ok(Json(page.view()))
}

/// POST /api/v1/about/cancel
pub async fn handle_cancel(State(state): State<AppState>) -> Json<AboutView> {
    let mut page = state.about.lock().await;
    page.cancel();
    Json(page.view())
}
