//! Axum route handlers for the Resume Builder.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::document::{EntryId, ListName, ResumeDocument};
use crate::resume::preview::{project, render_markdown, PreviewView};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `value` may be a JSON string or number; numbers are taken as their text.
#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    pub value: Value,
}

impl FieldUpdate {
    fn value_text(&self) -> Result<String, AppError> {
        match &self.value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(AppError::Validation(format!(
                "value for '{}' must be a string or number, got {other}",
                self.field
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub id: Uuid,
    pub document: ResumeDocument,
    pub preview: PreviewView,
}

impl ResumeResponse {
    fn new(id: Uuid, document: ResumeDocument) -> Self {
        let preview = project(&document);
        Self {
            id,
            document,
            preview,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    pub entry_id: EntryId,
    pub length: usize,
    #[serde(flatten)]
    pub resume: ResumeResponse,
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Resume session {id} not found"))
}

fn parse_list(list: &str) -> Result<ListName, AppError> {
    list.parse().map_err(AppError::NotFound)
}

fn parse_entry_id(entry_id: &str) -> Result<EntryId, AppError> {
    entry_id
        .parse()
        .map_err(|_| AppError::Validation(format!("'{entry_id}' is not a valid entry id")))
}

async fn load(state: &AppState, id: Uuid) -> Result<ResumeDocument, AppError> {
    state
        .resumes
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
) -> (StatusCode, Json<ResumeResponse>) {
    let (id, document) = state.resumes.create().await;
    (StatusCode::CREATED, Json(ResumeResponse::new(id, document)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let document = load(&state, id).await?;
    Ok(Json(ResumeResponse::new(id, document)))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_close_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.resumes.close(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// PATCH /api/v1/resumes/:id/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<ResumeResponse>, AppError> {
    let value = update.value_text()?;
    let (result, document) = state
        .resumes
        .update(id, |doc| doc.update_field(&update.field, &value))
        .await
        .ok_or_else(|| session_not_found(id))?;
    result?;
    Ok(Json(ResumeResponse::new(id, document)))
}

/// POST /api/v1/resumes/:id/:list
pub async fn handle_append_entry(
    State(state): State<AppState>,
    Path((id, list)): Path<(Uuid, String)>,
) -> Result<(StatusCode, Json<AppendResponse>), AppError> {
    let list = parse_list(&list)?;
    let (appended, document) = state
        .resumes
        .update(id, |doc| doc.append_list_item(list))
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok((
        StatusCode::CREATED,
        Json(AppendResponse {
            entry_id: appended.entry_id,
            length: appended.length,
            resume: ResumeResponse::new(id, document),
        }),
    ))
}

/// PATCH /api/v1/resumes/:id/:list/:entry_id
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((id, list, entry_id)): Path<(Uuid, String, String)>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<ResumeResponse>, AppError> {
    let list = parse_list(&list)?;
    let entry_id = parse_entry_id(&entry_id)?;
    let value = update.value_text()?;
    let (result, document) = state
        .resumes
        .update(id, |doc| doc.update_entry(list, entry_id, &update.field, &value))
        .await
        .ok_or_else(|| session_not_found(id))?;
    result?;
    Ok(Json(ResumeResponse::new(id, document)))
}

/// DELETE /api/v1/resumes/:id/:list/:entry_id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((id, list, entry_id)): Path<(Uuid, String, String)>,
) -> Result<Json<ResumeResponse>, AppError> {
    let list = parse_list(&list)?;
    let entry_id = parse_entry_id(&entry_id)?;
    let (result, document) = state
        .resumes
        .update(id, |doc| doc.remove_entry(list, entry_id))
        .await
        .ok_or_else(|| session_not_found(id))?;
    result?;
    Ok(Json(ResumeResponse::new(id, document)))
}

/// PATCH /api/v1/resumes/:id/:list/at/:index
pub async fn handle_update_entry_at(
    State(state): State<AppState>,
    Path((id, list, index)): Path<(Uuid, String, usize)>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<ResumeResponse>, AppError> {
    let list = parse_list(&list)?;
    let value = update.value_text()?;
    let (result, document) = state
        .resumes
        .update(id, |doc| doc.update_list_item(list, index, &update.field, &value))
        .await
        .ok_or_else(|| session_not_found(id))?;
    result?;
    Ok(Json(ResumeResponse::new(id, document)))
}

/// DELETE /api/v1/resumes/:id/:list/at/:index
pub async fn handle_remove_entry_at(
    State(state): State<AppState>,
    Path((id, list, index)): Path<(Uuid, String, usize)>,
) -> Result<Json<ResumeResponse>, AppError> {
    let list = parse_list(&list)?;
    let (result, document) = state
        .resumes
        .update(id, |doc| doc.remove_list_item(list, index))
        .await
        .ok_or_else(|| session_not_found(id))?;
    result?;
    Ok(Json(ResumeResponse::new(id, document)))
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewView>, AppError> {
    let document = load(&state, id).await?;
    Ok(Json(project(&document)))
}

/// GET /api/v1/resumes/:id/export
///
/// The preview as a Markdown download.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = load(&state, id).await?;
    let markdown = render_markdown(&project(&document));
    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"resume-{id}.md\""),
            ),
        ],
        markdown,
    ))
}
