// handlers/protected/notes.rs - note CRUD for the authenticated principal

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::models::Note;
use crate::database::NoteChanges;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Ids that are not UUIDs can never name a stored note.
fn parse_note_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::not_found("Note not found"))
}

/// GET /api/notes - the caller's notes, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.notes.list(&principal).await?))
}

/// POST /api/notes - body `{ "title"?, "content"? }`; an empty body is allowed
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => NoteRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let note = state.notes.create(&principal, req.title, req.content).await?;
    Ok(Json(note))
}

/// GET /api/notes/:id
pub async fn show(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_note_id(&id)?;
    Ok(Json(state.notes.get(&principal, id).await?))
}

/// PUT /api/notes/:id - omitted fields keep their stored value
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_note_id(&id)?;
    let Json(req) = payload?;
    let changes = NoteChanges {
        title: req.title,
        content: req.content,
    };
    Ok(Json(state.notes.update(&principal, id, changes).await?))
}

/// DELETE /api/notes/:id - 404 when the note does not exist
pub async fn delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_note_id(&id)?;
    state.notes.delete(&principal, id).await?;
    Ok(Json(json!({ "success": true })))
}
